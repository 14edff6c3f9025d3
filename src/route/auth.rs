use actix_web::{web, HttpResponse};
use diesel::result::{DatabaseErrorKind, Error as QueryError};

use crate::database::{self, model::user::User};
use crate::error::ApiError;
use crate::form::user::SignupFormData;

pub const EMAIL_TAKEN: &str = "Email taken";
pub const USERNAME_TAKEN: &str = "Username taken";

enum Outcome {
    Created(User),
    Taken(&'static str),
}

pub async fn signup(
    pool: web::Data<database::Pool>,
    form: web::Json<SignupFormData>,
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();

    form.check()
        .map_err(|violation| ApiError::BadRequest(violation.message))?;

    let outcome = web::block(move || -> database::Result<Outcome> {
        let mut conn = pool.get()?;

        if database::action::user::get_user_by_email(&mut conn, &form.email)?.is_some() {
            return Ok(Outcome::Taken(EMAIL_TAKEN));
        }

        if database::action::user::get_user_by_username(&mut conn, &form.username)?.is_some() {
            return Ok(Outcome::Taken(USERNAME_TAKEN));
        }

        let hash = bcrypt::hash(form.password.as_str(), bcrypt::DEFAULT_COST)?;

        match database::action::user::insert_new_user(
            &mut conn,
            form.username.as_str(),
            form.email.as_str(),
            hash.as_str(),
            form.role.as_str(),
        ) {
            Ok(user) => Ok(Outcome::Created(user)),
            // lost a race with a concurrent signup for the same account
            Err(e) => Ok(Outcome::Taken(taken_by(e)?)),
        }
    })
    .await??;

    match outcome {
        Outcome::Created(user) => {
            log::info!("registered {} as {}", user.username, user.role);

            Ok(HttpResponse::Created().json(serde_json::json!({
                "message": "Signup successful",
                "user": user.to_json(),
            })))
        }
        Outcome::Taken(message) => Err(ApiError::Conflict(message.to_string())),
    }
}

/// Conflict message for a unique-constraint failure; other errors pass through.
fn taken_by(err: QueryError) -> Result<&'static str, QueryError> {
    match err {
        QueryError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            if info.message().contains("email") {
                Ok(EMAIL_TAKEN)
            } else {
                Ok(USERNAME_TAKEN)
            }
        }
        other => Err(other),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/signup", web::post().to(signup));
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use super::*;
    use crate::database::{action, test_pool};
    use crate::route;

    fn body(username: &str, email: &str, role: &str) -> Value {
        json!({
            "username": username,
            "email": email,
            "password": "secret123",
            "role": role,
        })
    }

    #[actix_web::test]
    async fn registers_a_new_user() {
        let pool = test_pool();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pool.clone()))
                .configure(route::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(body("alice", "a@example.com", "instructor"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let json: Value = test::read_body_json(res).await;
        assert_eq!(json["message"], "Signup successful");
        assert_eq!(json["user"]["username"], "alice");
        assert_eq!(json["user"]["role"], "instructor");
        assert!(json["user"].get("password").is_none());

        let mut conn = pool.get().unwrap();
        let stored = action::user::get_user_by_email(&mut conn, "a@example.com")
            .unwrap()
            .unwrap();
        assert!(bcrypt::verify("secret123", &stored.password).unwrap());
    }

    #[actix_web::test]
    async fn rejects_duplicates_with_conflict() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_pool()))
                .configure(route::configure),
        )
        .await;

        let first = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(body("alice", "a@example.com", "student"))
            .to_request();
        assert_eq!(test::call_service(&app, first).await.status(), StatusCode::CREATED);

        let same_email = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(body("bob", "a@example.com", "student"))
            .to_request();
        let res = test::call_service(&app, same_email).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let json: Value = test::read_body_json(res).await;
        assert_eq!(json["message"], EMAIL_TAKEN);

        let same_name = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(body("alice", "other@example.com", "student"))
            .to_request();
        let res = test::call_service(&app, same_name).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let json: Value = test::read_body_json(res).await;
        assert_eq!(json["message"], USERNAME_TAKEN);
    }

    #[::core::prelude::v1::test]
    fn unique_violations_map_to_the_taken_column() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();
        action::user::insert_new_user(&mut conn, "alice", "a@example.com", "hash", "student")
            .unwrap();

        let same_email =
            action::user::insert_new_user(&mut conn, "bob", "a@example.com", "hash", "student")
                .unwrap_err();
        assert_eq!(taken_by(same_email).unwrap(), EMAIL_TAKEN);

        let same_name =
            action::user::insert_new_user(&mut conn, "alice", "b@example.com", "hash", "student")
                .unwrap_err();
        assert_eq!(taken_by(same_name).unwrap(), USERNAME_TAKEN);

        assert!(matches!(taken_by(QueryError::NotFound), Err(QueryError::NotFound)));
    }

    #[actix_web::test]
    async fn store_failure_is_an_opaque_internal_error() {
        let pool = database::build_pool(
            "/nonexistent/cursus/signup.db",
            1,
            std::time::Duration::from_millis(200),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pool))
                .configure(route::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(body("alice", "a@example.com", "student"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json: Value = test::read_body_json(res).await;
        assert_eq!(json, json!({ "message": "Internal server error" }));
    }

    #[actix_web::test]
    async fn rejects_invalid_payloads() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_pool()))
                .configure(route::configure),
        )
        .await;

        let cases = [
            body("alice", "a@example.com", "admin"),
            body("", "a@example.com", "student"),
            body("alice", "not-an-email", "student"),
            json!({ "username": "alice" }),
        ];

        for case in cases {
            let req = test::TestRequest::post()
                .uri("/api/auth/signup")
                .set_json(&case)
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", case);

            let json: Value = test::read_body_json(res).await;
            assert!(json["message"].is_string());
        }
    }
}
