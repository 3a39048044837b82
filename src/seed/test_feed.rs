//! A fake seed feed served from localhost for tests.

use axum::{Router, http::StatusCode, routing::get};
use tokio::net::TcpListener;

/// Two transactions in the format the real feed uses.
pub(crate) const FEED_JSON: &str = r#"[
    {
        "id": 1,
        "title": "Fjallraven  - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 329.85,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "sold": false,
        "dateOfSale": "2021-11-27T20:29:54+05:30"
    },
    {
        "id": 2,
        "title": "Mens Casual Premium Slim Fit T-Shirts",
        "price": 44.6,
        "description": "Slim-fitting style, contrast raglan long sleeve.",
        "category": "men's clothing",
        "sold": true,
        "dateOfSale": "2021-10-27T20:29:54+05:30"
    }
]"#;

/// Serve `body` with `status` from a new local server and return its URL.
pub(crate) async fn serve_feed(status: StatusCode, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test listener");
    let address = listener.local_addr().expect("Could not get local address");

    let app = Router::new().route("/feed", get(move || async move { (status, body) }));
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Test feed server failed")
    });

    format!("http://{address}/feed")
}

/// A URL on a local port that nothing is listening on.
pub(crate) async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test listener");
    let address = listener.local_addr().expect("Could not get local address");
    drop(listener);

    format!("http://{address}/feed")
}
