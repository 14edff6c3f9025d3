use diesel::prelude::*;
use uuid::Uuid;

use crate::database::model::user::User;
use crate::database::Result;

pub fn insert_new_user(
    conn: &mut SqliteConnection,
    new_username: &str,
    new_email: &str,
    new_password: &str,
    new_role: &str,
) -> QueryResult<User> {
    use crate::database::schema::users::dsl::*;

    let new_user = User {
        id: Uuid::new_v4().to_string(),
        username: new_username.to_string(),
        email: new_email.to_string(),
        password: new_password.to_string(),
        role: new_role.to_string(),
    };

    diesel::insert_into(users).values(&new_user).execute(conn)?;

    Ok(new_user)
}

pub fn get_user_by_email(conn: &mut SqliteConnection, email: &str) -> Result<Option<User>> {
    use crate::database::schema::users::dsl::{email as email_column, users};

    let user = users
        .filter(email_column.eq(email))
        .first::<User>(conn)
        .optional()?;

    Ok(user)
}

pub fn get_user_by_username(conn: &mut SqliteConnection, username: &str) -> Result<Option<User>> {
    use crate::database::schema::users::dsl::{username as username_column, users};

    let user = users
        .filter(username_column.eq(username))
        .first::<User>(conn)
        .optional()?;

    Ok(user)
}
