//! Defines the session data for logged-in users and the private cookie that
//! carries it between requests.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    stores::{User, UserId},
};

/// The name of the cookie that holds the serialised [Session].
pub const COOKIE_SESSION: &str = "session";

/// The default duration for which a session is valid.
pub const DEFAULT_SESSION_DURATION: Duration = Duration::hours(24);

mod datetime_format {
    //! Specifies how to serialize a [time::OffsetDateTime] in a custom format that
    //! avoids serialisations with datetimes containing midnight.
    //!
    //! The default serializer for [time::OffsetDateTime] will serialize
    //! "00:00:00.000000" as "0:00:00.0" and the deserializer would error out
    //! because it expects the hours to be two digits, not one.
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{
        OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
    };

    /// Date time format for the session expiry, e.g. "2021-01-01 00:00:00.000000 +00:00:00".
    const DATE_TIME_FORMAT: &[BorrowedFormatItem] = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond] [offset_hour \
             sign:mandatory]:[offset_minute]:[offset_second]"
    );

    pub fn serialize<S>(dt: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = dt
            .format(DATE_TIME_FORMAT)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        OffsetDateTime::parse(&s, DATE_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// The details of a logged-in user, held in a private cookie.
///
/// The expiry is stored inside the cookie value rather than in the cookie's
/// `Expires` attribute so that the server, not the browser, decides when a
/// session stops being accepted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    /// The ID of the logged-in user.
    pub user_id: UserId,
    /// The name the user registered with.
    pub username: String,
    /// The email address the user signs in with.
    pub email: String,
    /// When the session stops being valid.
    #[serde(
        serialize_with = "datetime_format::serialize",
        deserialize_with = "datetime_format::deserialize"
    )]
    pub expires_at: OffsetDateTime,
}

impl Session {
    /// Create a session for `user` that expires [DEFAULT_SESSION_DURATION] from now.
    pub fn new(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            email: user.email,
            expires_at: OffsetDateTime::now_utc() + DEFAULT_SESSION_DURATION,
        }
    }
}

/// Add a session cookie to the cookie jar, indicating that a user is logged in.
///
/// The cookie carries no `Expires` attribute, so browsers drop it when they
/// close. The expiry embedded in `session` is what [get_session] checks.
///
/// Returns the cookie jar with the cookie added.
///
/// # Errors
///
/// Returns an [Error::SessionInvalid] if the session cannot be serialised.
pub fn set_session_cookie(
    jar: PrivateCookieJar,
    session: &Session,
) -> Result<PrivateCookieJar, Error> {
    let session_string =
        serde_json::to_string(session).map_err(|error| Error::SessionInvalid(error.to_string()))?;

    Ok(jar.add(
        Cookie::build((COOKIE_SESSION, session_string))
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    ))
}

/// Retrieve and validate the session from the cookie jar.
///
/// # Errors
///
/// Returns:
/// - [Error::SessionMissing] if there is no session cookie.
/// - [Error::SessionInvalid] if the cookie contents cannot be parsed.
/// - [Error::SessionExpired] if the session's expiry is in the past.
pub fn get_session(jar: &PrivateCookieJar) -> Result<Session, Error> {
    let cookie = jar.get(COOKIE_SESSION).ok_or(Error::SessionMissing)?;
    let session: Session = serde_json::from_str(cookie.value_trimmed())
        .map_err(|error| Error::SessionInvalid(error.to_string()))?;

    if session.expires_at < OffsetDateTime::now_utc() {
        return Err(Error::SessionExpired);
    }

    Ok(session)
}

/// Set the session cookie to an invalid value and set its max age to zero, which should delete the cookie on the client side.
pub fn invalidate_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_SESSION, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}
