//! The user profile: optional contact details stored alongside the user row,
//! the profile page, and the endpoint for updating the profile.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    user::UserID,
};

// ==== MODELS ====

/// Optional contact details for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// The ID of the user the profile belongs to.
    pub user_id: UserID,
    /// The user's phone number.
    pub phone: Option<String>,
    /// The city the user lives in.
    pub city: Option<String>,
    /// A short free-form description of the user.
    pub bio: Option<String>,
}

/// Create the profile table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_profile_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS profile (
                user_id INTEGER PRIMARY KEY,
                phone TEXT,
                city TEXT,
                bio TEXT,
                FOREIGN KEY(user_id) REFERENCES user(id) ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

/// Create an empty profile for `user_id`.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred, including
/// when a profile already exists for `user_id`.
pub fn create_profile(user_id: UserID, connection: &Connection) -> Result<Profile, Error> {
    connection.execute(
        "INSERT INTO profile (user_id) VALUES (?1)",
        (user_id.as_i64(),),
    )?;

    Ok(Profile {
        user_id,
        phone: None,
        city: None,
        bio: None,
    })
}

/// Get the profile belonging to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not have a profile.
/// - there was an error trying to access the store.
pub fn get_profile_by_user(user_id: UserID, connection: &Connection) -> Result<Profile, Error> {
    connection
        .prepare("SELECT user_id, phone, city, bio FROM profile WHERE user_id = :user_id")?
        .query_row(&[(":user_id", &user_id.as_i64())], map_profile_row)
        .map_err(|error| error.into())
}

/// Overwrite the profile belonging to `user_id` with `phone`, `city` and `bio`.
///
/// # Errors
///
/// This function will return a:
/// - [Error::NotFound] if `user_id` does not have a profile.
/// - [Error::SqlError] if some other SQL related error occurred.
pub fn update_profile(
    user_id: UserID,
    phone: Option<&str>,
    city: Option<&str>,
    bio: Option<&str>,
    connection: &Connection,
) -> Result<Profile, Error> {
    let rows_updated = connection.execute(
        "UPDATE profile SET phone = ?1, city = ?2, bio = ?3 WHERE user_id = ?4",
        (phone, city, bio, user_id.as_i64()),
    )?;

    if rows_updated == 0 {
        return Err(Error::NotFound);
    }

    Ok(Profile {
        user_id,
        phone: phone.map(str::to_owned),
        city: city.map(str::to_owned),
        bio: bio.map(str::to_owned),
    })
}

fn map_profile_row(row: &rusqlite::Row) -> Result<Profile, rusqlite::Error> {
    let raw_user_id = row.get(0)?;

    Ok(Profile {
        user_id: UserID::new(raw_user_id),
        phone: row.get(1)?,
        city: row.get(2)?,
        bio: row.get(3)?,
    })
}

// ==== ROUTES ====

/// The state needed for the profile page and update endpoint.
#[derive(Debug, Clone)]
pub struct ProfileState {
    /// The database connection shared between request handlers.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ProfileState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn text_field(name: &str, label: &str, value: Option<&str>) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            input
                type="text"
                name=(name)
                id=(name)
                class=(FORM_TEXT_INPUT_STYLE)
                value=[value];
        }
    }
}

fn profile_form(profile: &Profile) -> Markup {
    html! {
        form
            hx-put=(endpoints::PROFILE_API)
            hx-target-error="#alert-container"
            hx-target="#alert-container"
            hx-swap="innerHTML"
            class="w-full max-w-md space-y-4"
        {
            (text_field("phone", "Phone", profile.phone.as_deref()))
            (text_field("city", "City", profile.city.as_deref()))

            div
            {
                label for="bio" class=(FORM_LABEL_STYLE) { "Bio" }

                textarea
                    name="bio"
                    id="bio"
                    rows="4"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @if let Some(bio) = &profile.bio { (bio) }
                }
            }

            button
                type="submit"
                class="w-full px-4 py-2 bg-blue-500 dark:bg-blue-600 disabled:bg-blue-700
                    hover:enabled:bg-blue-600 hover:enabled:dark:bg-blue-700 text-white rounded"
            {
                "Save Profile"
            }
        }
    }
}

/// Display the profile page for the logged in user.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_profile_page(
    State(state): State<ProfileState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    let profile = {
        let connection = state
            .db_connection
            .lock()
            .expect("Could not acquire database lock");

        match get_profile_by_user(user_id, &connection) {
            Ok(profile) => profile,
            Err(error) => return error.into_response(),
        }
    };

    let nav_bar = NavBar::new(endpoints::PROFILE_VIEW).into_html();
    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4" { "Your Profile" }

            (profile_form(&profile))
        }
    };

    base("Profile", &[], &content).into_response()
}

/// The data submitted from the profile form.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileForm {
    /// The user's phone number, may be empty.
    pub phone: Option<String>,
    /// The city the user lives in, may be empty.
    pub city: Option<String>,
    /// A short free-form description of the user, may be empty.
    pub bio: Option<String>,
}

/// Treat empty form fields the same as missing ones.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Handle profile updates. Returns a success alert or an error alert.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn put_profile(
    State(state): State<ProfileState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<ProfileForm>,
) -> Response {
    let connection = state
        .db_connection
        .lock()
        .expect("Could not acquire database lock");

    match update_profile(
        user_id,
        non_empty(form.phone.as_deref()),
        non_empty(form.city.as_deref()),
        non_empty(form.bio.as_deref()),
        &connection,
    ) {
        Ok(_) => Alert::success("Profile updated", "").into_response(),
        Err(Error::NotFound) => Alert::error(
            "Could not update profile",
            "The profile could not be found.",
        )
        .into_response_with_status(StatusCode::NOT_FOUND),
        Err(error) => {
            tracing::error!("An unexpected error occurred while updating a profile: {error}");
            error.into_alert_response()
        }
    }
}
