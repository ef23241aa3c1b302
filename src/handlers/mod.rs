pub mod categories;
pub mod products;

// Collection names predate this server; the deployed frontend's data lives
// under the Spanish names.
pub const PRODUCTS: &str = "productos";
pub const CATEGORIES: &str = "categorias";

/// GET / - plain-text liveness message.
pub async fn root() -> &'static str {
    "Crisol server is online."
}
