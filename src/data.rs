use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::{
    entities::{movie, user},
    error::{AppError, AppResult},
    models::NewMovie,
};

/// Owns the database connection; the only component that reads or writes
/// persisted state. Every operation commits as its own statement.
#[derive(Clone)]
pub struct DataManager {
    db: DatabaseConnection,
}

impl DataManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_user(&self, name: &str, email: &str) -> AppResult<user::Model> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("name must not be empty".to_string()));
        }
        if email.is_empty() {
            return Err(AppError::InvalidInput("email must not be empty".to_string()));
        }

        let user = user::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            ..Default::default()
        };

        Ok(user.insert(&self.db).await?)
    }

    pub async fn get_users(&self) -> AppResult<Vec<user::Model>> {
        Ok(user::Entity::find().all(&self.db).await?)
    }

    pub async fn get_user(&self, id: i32) -> AppResult<user::Model> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound { entity: "user", id })
    }

    pub async fn get_movies(&self, user_id: i32) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find()
            .filter(movie::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?)
    }

    pub async fn add_movie(&self, new: NewMovie) -> AppResult<movie::Model> {
        let movie = movie::ActiveModel {
            title: Set(new.title),
            year: Set(new.year),
            director: Set(new.director),
            genre: Set(new.genre),
            poster: Set(new.poster),
            user_id: Set(new.user_id),
            ..Default::default()
        };

        Ok(movie.insert(&self.db).await?)
    }

    pub async fn update_movie(&self, movie_id: i32, new_title: &str) -> AppResult<()> {
        let new_title = new_title.trim();
        if new_title.is_empty() {
            return Err(AppError::InvalidInput("title must not be empty".to_string()));
        }

        let movie = movie::Entity::find_by_id(movie_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound { entity: "movie", id: movie_id })?;

        let mut movie: movie::ActiveModel = movie.into();
        movie.title = Set(new_title.to_string());
        movie.update(&self.db).await?;

        Ok(())
    }

    pub async fn delete_movie(&self, movie_id: i32) -> AppResult<()> {
        let result = movie::Entity::delete_by_id(movie_id).exec(&self.db).await?;
        // A repeated delete must fail, not silently succeed.
        if result.rows_affected == 0 {
            return Err(AppError::NotFound { entity: "movie", id: movie_id });
        }
        Ok(())
    }
}
