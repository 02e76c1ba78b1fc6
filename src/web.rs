//! HTTP surface: GraphQL over Rocket, and the request guard that decides
//! who is asking.

use std::sync::Arc;

use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::response::{content, Redirect};
use rocket::{Build, Rocket, State};

use crate::auth::TokenKeys;
use crate::config::Config;
use crate::graphql::{self, Context, Schema};
use crate::model::User;
use crate::store::Store;

/// Shared by every request.
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub keys: TokenKeys,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("authorization header is not a bearer token")]
    NotBearer,
    #[error("bearer token failed verification")]
    Invalid,
    #[error("application state is not mounted")]
    NoState,
    #[error("token subject could not be looked up")]
    Store,
}

fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Context {
    type Error = TokenError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let state = match request.rocket().state::<AppState>() {
            Some(state) => state,
            None => return Outcome::Error((Status::InternalServerError, TokenError::NoState)),
        };

        let header = match request.headers().get_one("Authorization") {
            Some(header) => header,
            None => return Outcome::Success(Context::anonymous(state.store.clone())),
        };

        let token = match bearer_token(header) {
            Some(token) => token,
            None => {
                log::warn!("Rejected request with a non-bearer authorization header");
                return Outcome::Error((Status::Unauthorized, TokenError::NotBearer));
            }
        };

        let claims = match state.keys.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                log::warn!("Rejected bearer token: {}", e);
                return Outcome::Error((Status::Unauthorized, TokenError::Invalid));
            }
        };

        match state.store.get_student(&claims.sub) {
            Ok(Some(student)) => {
                Outcome::Success(Context::authenticated(state.store.clone(), User::from(student)))
            }
            Ok(None) => {
                log::debug!("Token subject {} is not a known student", claims.sub);
                Outcome::Success(Context::anonymous(state.store.clone()))
            }
            Err(e) => {
                log::error!("Failed to look up token subject {}: {}", claims.sub, e);
                Outcome::Error((Status::InternalServerError, TokenError::Store))
            }
        }
    }
}

#[rocket::get("/graphiql")]
fn graphiql() -> content::RawHtml<String> {
    juniper_rocket::graphiql_source("/graphql", None)
}

#[rocket::get("/graphql?<request..>")]
async fn get_graphql_handler(
    context: Context,
    request: juniper_rocket::GraphQLRequest,
    schema: &State<Schema>,
) -> juniper_rocket::GraphQLResponse {
    request.execute(schema, &context).await
}

#[rocket::post("/graphql", data = "<request>")]
async fn post_graphql_handler(
    context: Context,
    request: juniper_rocket::GraphQLRequest,
    schema: &State<Schema>,
) -> juniper_rocket::GraphQLResponse {
    request.execute(schema, &context).await
}

#[rocket::get("/")]
fn root_redirect() -> Redirect {
    Redirect::temporary("/graphiql")
}

#[rocket::get("/health")]
fn health() -> Status {
    Status::Accepted
}

pub fn build_rocket(config: &Config, store: Arc<dyn Store>) -> Rocket<Build> {
    let rocket_figment = rocket::Config::figment()
        .merge(("address", config.address))
        .merge(("port", config.port));

    rocket::custom(rocket_figment)
        .manage(graphql::schema())
        .manage(AppState {
            store,
            keys: TokenKeys::new(&config.jwt_secret, config.token_ttl_secs),
        })
        .mount(
            "/",
            rocket::routes![
                graphiql,
                get_graphql_handler,
                post_graphql_handler,
                root_redirect,
                health
            ],
        )
}
