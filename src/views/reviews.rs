//! Reseñas: las del usuario (con borrado en dos pasos) y el formulario
//! para publicar una nueva.

use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use futures::future::join_all;

use super::{authed_api, remove_by_id, require_user, Gate, Loadable};
use crate::api::upload::ImageUpload;
use crate::api::{ApiClient, ClientError, ClientResult};
use crate::models::{Id, NewReview, Review};
use crate::session::SessionReader;

pub const REVIEWS_SIGN_IN: &str = "Please log in to view your reviews";

/// Datos del restaurante que acompañan a cada reseña
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantSummary {
    pub name: String,
    pub cuisine: Option<String>,
    pub address: String,
}

pub struct UserReviews {
    api: ApiClient,
    session: SessionReader,
    pub reviews: Loadable<Vec<Review>>,
    /// Detalles por id de restaurante; los que fallaron no están
    pub restaurants: HashMap<Id, RestaurantSummary>,
    /// Reseña con el modal de borrado abierto
    pub pending_delete: Option<Id>,
    pub error: Option<String>,
    /// Modal "Review Deleted"
    pub deleted: bool,
}

impl UserReviews {
    pub fn new(api: ApiClient, session: SessionReader) -> Self {
        Self {
            api,
            session,
            reviews: Loadable::Loading,
            restaurants: HashMap::new(),
            pending_delete: None,
            error: None,
            deleted: false,
        }
    }

    /// Pide las reseñas y después, en paralelo, un restaurante por cada id
    /// distinto
    pub async fn load(&mut self) -> Result<(), Gate> {
        let user = require_user(&self.session, REVIEWS_SIGN_IN)?;
        let api = self.api.for_session(&user);

        let reviews = match api.user_reviews(&user.user_id).await {
            Ok(reviews) => reviews,
            Err(e) => {
                self.reviews = Loadable::Failed(
                    e.user_message("view your reviews", "Failed to fetch reviews"),
                );
                return Ok(());
            }
        };

        self.restaurants = hydrate(&api, &reviews).await;
        self.reviews = Loadable::Ready(reviews);
        Ok(())
    }

    pub fn request_delete(&mut self, review_id: &str) {
        self.pending_delete = Some(review_id.to_string());
    }

    pub fn dismiss_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Borra la reseña del modal y la quita de la lista local
    ///
    /// Sin modal abierto no hace nada.
    pub async fn confirm_delete(&mut self) -> ClientResult<()> {
        let Some(review_id) = self.pending_delete.clone() else {
            return Ok(());
        };

        let result = match authed_api(&self.api, &self.session) {
            Ok(api) => api.delete_review(&review_id).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                if let Some(list) = self.reviews.ready_mut() {
                    remove_by_id(list, &review_id, |r| r.id.as_str());
                }
                tracing::info!(review_id = %review_id, "Reseña eliminada");
                self.pending_delete = None;
                self.deleted = true;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message("delete your review", "Failed to delete review"));
                Err(e)
            }
        }
    }
}

async fn hydrate(api: &ApiClient, reviews: &[Review]) -> HashMap<Id, RestaurantSummary> {
    let mut ids: Vec<&str> = Vec::new();
    for review in reviews {
        if !ids.contains(&review.restaurant_id.as_str()) {
            ids.push(&review.restaurant_id);
        }
    }

    let lookups = ids.iter().map(|id| async move { (*id, api.get_restaurant(id).await) });

    join_all(lookups)
        .await
        .into_iter()
        .filter_map(|(id, result)| match result {
            Ok(restaurant) => Some((
                id.to_string(),
                RestaurantSummary {
                    address: restaurant.display_address(),
                    name: restaurant.name,
                    cuisine: restaurant.cuisine,
                },
            )),
            Err(e) => {
                tracing::warn!(restaurant_id = id, error = %e, "Sin detalles del restaurante");
                None
            }
        })
        .collect()
}

pub const DEFAULT_RATING: u8 = 4;

/// Modal "Write a Review"
#[derive(Debug, Clone)]
pub struct ReviewForm {
    pub restaurant_id: Id,
    pub rating: u8,
    pub comments: String,
    pub images: Vec<ImageUpload>,
    pub submitting: bool,
    pub error: Option<String>,
}

impl ReviewForm {
    pub fn new(restaurant_id: impl Into<Id>) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            rating: DEFAULT_RATING,
            comments: String::new(),
            images: Vec::new(),
            submitting: false,
            error: None,
        }
    }

    /// Publica la reseña; si sale bien el formulario vuelve a su estado
    /// inicial
    pub async fn submit(&mut self, api: &ApiClient, session: &SessionReader) -> ClientResult<()> {
        let Some(user) = session.user() else {
            let error = ClientError::validation_field("customerID", "Please log in to write a review");
            self.error = Some("Please log in to write a review".to_string());
            return Err(error);
        };

        let review = NewReview {
            restaurant_id: self.restaurant_id.clone(),
            customer_id: user.user_id.clone(),
            rating: self.rating.clamp(1, 5),
            comments: self.comments.clone(),
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        self.submitting = true;
        self.error = None;
        let result = api.for_session(&user).submit_review(&review, &self.images).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                tracing::info!(restaurant_id = %review.restaurant_id, rating = review.rating, "Reseña publicada");
                self.rating = DEFAULT_RATING;
                self.comments.clear();
                self.images.clear();
                Ok(())
            }
            Err(e) => {
                self.error = Some("Failed to submit review".to_string());
                Err(e)
            }
        }
    }
}
