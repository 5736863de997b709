//! # API de administración
//!
//! Aprobación de restaurantes, bajas y analíticas. Requiere `ROLE_ADMIN`.

use reqwest::Method;

use super::{ApiClient, ClientResult};
use crate::models::{BookingStat, DashboardSummary, MonthlyStat, PopularSlots, Restaurant};

impl ApiClient {
    pub async fn pending_restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        let builder = self.request(Method::GET, "/admin/restaurants/pending");
        self.send_json("pending_restaurants", builder).await
    }

    pub async fn approve_restaurant(&self, id: &str) -> ClientResult<()> {
        let builder = self.request(Method::PUT, &format!("/admin/restaurants/{}/approve", id));
        self.send_empty("approve_restaurant", builder).await
    }

    pub async fn reject_restaurant(&self, id: &str) -> ClientResult<()> {
        let builder = self.request(Method::PUT, &format!("/admin/restaurants/{}/reject", id));
        self.send_empty("reject_restaurant", builder).await
    }

    pub async fn all_restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        let builder = self.request(Method::GET, "/admin/restaurants");
        self.send_json("all_restaurants", builder).await
    }

    pub async fn delete_restaurant(&self, id: &str) -> ClientResult<()> {
        let builder = self.request(Method::DELETE, &format!("/admin/restaurants/{}", id));
        self.send_empty("delete_restaurant", builder).await
    }

    pub async fn dashboard_summary(&self) -> ClientResult<DashboardSummary> {
        let builder = self.request(Method::GET, "/admin/restaurants/dashboard");
        self.send_json("dashboard_summary", builder).await
    }

    pub async fn booking_stats(&self) -> ClientResult<Vec<BookingStat>> {
        let builder = self.request(Method::GET, "/booking-stats");
        self.send_json("booking_stats", builder).await
    }

    pub async fn popular_slots(&self) -> ClientResult<PopularSlots> {
        let builder = self.request(Method::GET, "/booking-stats/analytics/popular-slots");
        self.send_json("popular_slots", builder).await
    }

    pub async fn monthly_stats(&self) -> ClientResult<Vec<MonthlyStat>> {
        let builder = self.request(Method::GET, "/booking-stats/analytics/monthly");
        self.send_json("monthly_stats", builder).await
    }
}
