use std::sync::Arc;

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{AddMovieForm, CreateUserForm, NewMovie, UpdateMovieForm},
    templates,
};

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let users = state.data.get_users().await?;
    Ok(Html(templates::index_page(&users)))
}

/// Plain-text dump of every user, mostly useful for poking at the app with
/// curl.
pub async fn list_users(State(state): State<Arc<AppState>>) -> AppResult<String> {
    let users = state.data.get_users().await?;
    let listed: Vec<String> = users.iter().map(ToString::to_string).collect();
    Ok(format!("[{}]", listed.join(", ")))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreateUserForm>,
) -> AppResult<Redirect> {
    state.data.create_user(&form.name, &form.email).await?;
    Ok(Redirect::to("/"))
}

pub async fn movies(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> AppResult<Html<String>> {
    let user = state.data.get_user(user_id).await?;
    let movies = state.data.get_movies(user.id).await?;
    Ok(Html(templates::movies_page(&user, &movies)))
}

pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
    Form(form): Form<AddMovieForm>,
) -> AppResult<Response> {
    let user = state.data.get_user(user_id).await?;
    let year = parse_year_field(form.year.as_deref())?;

    // A failed lookup renders in place instead of redirecting, so the form
    // the user just submitted is not lost behind a bounce.
    let found = match state.omdb.lookup(&form.title, year).await {
        Ok(found) => found,
        Err(err) => {
            let status = err.status_code();
            let body = templates::lookup_failed_page(&user, &err.to_string());
            return Ok((status, Html(body)).into_response());
        },
    };

    state.data.add_movie(NewMovie::from_lookup(found, user.id)).await?;
    Ok(Redirect::to(&format!("/users/{user_id}/movies")).into_response())
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path((user_id, movie_id)): Path<(i32, i32)>,
    Form(form): Form<UpdateMovieForm>,
) -> AppResult<Redirect> {
    state.data.update_movie(movie_id, &form.title).await?;
    Ok(Redirect::to(&format!("/users/{user_id}/movies")))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path((user_id, movie_id)): Path<(i32, i32)>,
) -> AppResult<Redirect> {
    state.data.delete_movie(movie_id).await?;
    Ok(Redirect::to(&format!("/users/{user_id}/movies")))
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(templates::not_found_page()))
}

// The year box is free text; blank means "no year filter".
fn parse_year_field(raw: Option<&str>) -> AppResult<Option<i32>> {
    let Some(raw) = raw else { return Ok(None) };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| AppError::InvalidInput(format!("year must be a number, got {trimmed:?}")))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Arc, time::Duration};

    use axum::{
        Json, Router,
        body::{Body, to_bytes},
        extract::Query,
        http::{Request, StatusCode, header::LOCATION},
        routing::get,
    };
    use tower::ServiceExt;

    use crate::{AppState, app, data::DataManager, models::NewMovie, omdb::OmdbClient};

    /// Loopback stand-in for the metadata provider: knows "Inception",
    /// reports everything else as unmatched the way OMDb does.
    async fn stub_omdb() -> String {
        let router = Router::new().route(
            "/",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let title = params.get("t").cloned().unwrap_or_default();
                if title.eq_ignore_ascii_case("inception") {
                    Json(serde_json::json!({
                        "Title": "Inception",
                        "Year": "2010",
                        "Director": "Christopher Nolan",
                        "Genre": "Action, Adventure, Sci-Fi",
                        "Poster": "https://img.example/inception.jpg",
                        "Response": "True",
                    }))
                } else {
                    Json(serde_json::json!({
                        "Response": "False",
                        "Error": "Movie not found!",
                    }))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}")
    }

    async fn test_state(omdb_base: String) -> Arc<AppState> {
        let db = crate::db::connect_and_migrate("sqlite::memory:").await.unwrap();
        let omdb = OmdbClient::new(
            reqwest::Client::new(),
            "test-key".to_string(),
            omdb_base,
            Duration::from_secs(2),
            50,
        );
        Arc::new(AppState { data: DataManager::new(db), omdb: Arc::new(omdb) })
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn create_user_then_add_movie_end_to_end() {
        let state = test_state(stub_omdb().await).await;
        let app = app(state.clone());

        let resp = app
            .clone()
            .oneshot(form_post("/users", "name=Ada&email=ada%40example.com"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), "/");

        let users = state.data.get_users().await.unwrap();
        let ada = users.iter().find(|u| u.name == "Ada").unwrap();

        let resp = app
            .clone()
            .oneshot(form_post(
                &format!("/users/{}/movies", ada.id),
                "title=Inception&year=2010",
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get(LOCATION).unwrap(),
            &format!("/users/{}/movies", ada.id)
        );

        let movies = state.data.get_movies(ada.id).await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Inception");
        assert_eq!(movies[0].year, 2010);
        assert_eq!(movies[0].user_id, ada.id);

        let resp = app
            .oneshot(Request::get(format!("/users/{}/movies", ada.id)).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;
        assert!(body.contains("Inception"));
        assert!(body.contains("Christopher Nolan"));
    }

    #[tokio::test]
    async fn failed_lookup_renders_inline_error_without_redirect() {
        let state = test_state(stub_omdb().await).await;
        let app = app(state.clone());
        let ada = state.data.create_user("Ada", "ada@example.com").await.unwrap();

        let resp = app
            .oneshot(form_post(
                &format!("/users/{}/movies", ada.id),
                "title=Zzzznotamovie123&year=",
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get(LOCATION).is_none());
        let body = body_text(resp).await;
        assert!(body.contains("Movie not found!"));

        assert!(state.data.get_movies(ada.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_year_is_rejected_before_the_lookup() {
        let state = test_state("http://127.0.0.1:1".to_string()).await;
        let app = app(state.clone());
        let ada = state.data.create_user("Ada", "ada@example.com").await.unwrap();

        // The provider address is unreachable on purpose: a bad year must
        // fail validation without any outbound call.
        let resp = app
            .oneshot(form_post(&format!("/users/{}/movies", ada.id), "title=Heat&year=abc"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(state.data.get_movies(ada.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_user_submission_is_a_conflict() {
        let state = test_state(stub_omdb().await).await;
        let app = app(state.clone());

        let first = app
            .clone()
            .oneshot(form_post("/users", "name=Ada&email=ada%40example.com"))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::SEE_OTHER);

        let second = app
            .oneshot(form_post("/users", "name=Ada&email=ada%40example.com"))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(state.data.get_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn users_route_returns_a_text_dump() {
        let state = test_state(stub_omdb().await).await;
        let app = app(state.clone());
        state.data.create_user("Ada", "ada@example.com").await.unwrap();
        state.data.create_user("Bob", "bob@example.com").await.unwrap();

        let resp =
            app.oneshot(Request::get("/users").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_text(resp).await;
        assert!(body.starts_with('['));
        assert!(body.ends_with(']'));
        assert!(body.contains("<User Ada>"));
        assert!(body.contains("<User Bob>"));
    }

    #[tokio::test]
    async fn renaming_and_deleting_a_movie_through_the_routes() {
        let state = test_state(stub_omdb().await).await;
        let app = app(state.clone());
        let ada = state.data.create_user("Ada", "ada@example.com").await.unwrap();
        let movie = state
            .data
            .add_movie(NewMovie {
                title: "Heat".to_string(),
                year: 1995,
                director: "Michael Mann".to_string(),
                genre: "Crime, Drama".to_string(),
                poster: "https://img.example/heat.jpg".to_string(),
                user_id: ada.id,
            })
            .await
            .unwrap();

        let resp = app
            .clone()
            .oneshot(form_post(
                &format!("/users/{}/movies/{}/update", ada.id, movie.id),
                "title=Collateral",
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let movies = state.data.get_movies(ada.id).await.unwrap();
        assert_eq!(movies[0].title, "Collateral");
        assert_eq!(movies[0].year, 1995);

        let resp = app
            .clone()
            .oneshot(form_post(&format!("/users/{}/movies/{}/delete", ada.id, movie.id), ""))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert!(state.data.get_movies(ada.id).await.unwrap().is_empty());

        // Deleting the same movie again must surface the missing row.
        let resp = app
            .oneshot(form_post(&format!("/users/{}/movies/{}/delete", ada.id, movie.id), ""))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn movie_page_for_a_missing_user_is_not_found() {
        let state = test_state(stub_omdb().await).await;
        let app = app(state);

        let resp = app
            .oneshot(Request::get("/users/999/movies").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unmatched_routes_render_the_not_found_page() {
        let state = test_state(stub_omdb().await).await;
        let app = app(state);

        let resp = app
            .oneshot(Request::get("/definitely/not/here").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_text(resp).await;
        assert!(body.contains("404"));
    }
}
