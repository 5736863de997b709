use reqwest::Method;

use super::upload::{multipart_form, ImageUpload};
use super::{ApiClient, ClientResult};
use crate::models::review::NewReview;
use crate::models::Review;

impl ApiClient {
    /// Publica una reseña con sus fotos (`POST /reviews/standalone`)
    pub async fn submit_review(&self, review: &NewReview, images: &[ImageUpload]) -> ClientResult<()> {
        let form = multipart_form(review, images)?;
        let builder = self.request(Method::POST, "/reviews/standalone").multipart(form);
        self.send_empty("submit_review", builder).await
    }

    pub async fn user_reviews(&self, user_id: &str) -> ClientResult<Vec<Review>> {
        let builder = self.request(Method::GET, &format!("/users/{}/reviews", user_id));
        self.send_json("user_reviews", builder).await
    }

    pub async fn delete_review(&self, review_id: &str) -> ClientResult<()> {
        let builder = self.request(Method::DELETE, &format!("/reviews/{}", review_id));
        self.send_empty("delete_review", builder).await
    }
}
