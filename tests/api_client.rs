mod common;

use common::{api, search_json, TACO_JSON};
use menuhub::api::{Method, RequestBody};
use menuhub::domain::MinorUnits;
use menuhub::form::{decode, encode, FieldValue, ImageFile};
use menuhub::query::SearchRequest;
use menuhub::search::{SearchState, SortOption};
use menuhub::MenuhubError;

#[tokio::test]
async fn search_is_anonymous_and_encodes_state() {
    let (api, transport) = api(None);
    transport.respond(200, &search_json(1));

    let state = SearchState::default()
        .set_search_query("tacos al pastor")
        .set_selected_cuisines(["Mexican", "Tacos"])
        .set_sort_option(SortOption::DeliveryPrice)
        .set_page(2);
    let request = SearchRequest::derive(&state, Some("san antonio")).unwrap();

    let response = api.search_restaurants(&request).await.unwrap();
    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].delivery_price, MinorUnits(299));

    let sent = transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].header("authorization"), None);
    assert_eq!(
        sent[0].url.as_str(),
        "https://api.example.com/api/restaurant/search/san%20antonio?searchQuery=tacos+al+pastor&page=2&selectedCuisines=Mexican%2CTacos&sortOption=deliveryPrice"
    );
}

#[tokio::test]
async fn empty_search_is_not_an_error() {
    let (api, transport) = api(None);
    transport.respond(200, r#"{"data": [], "pagination": {"page": 1, "pages": 0, "total": 0}}"#);

    let request = SearchRequest::derive(&SearchState::default(), Some("nowhere")).unwrap();
    let response = api.search_restaurants(&request).await.unwrap();
    assert!(response.is_empty());
}

#[tokio::test]
async fn server_error_becomes_transport_error() {
    let (api, transport) = api(None);
    transport.respond(500, "Internal Server Error");

    let request = SearchRequest::derive(&SearchState::default(), Some("austin")).unwrap();
    let error = api.search_restaurants(&request).await.unwrap_err();
    assert!(matches!(error, MenuhubError::Transport { status: Some(500), .. }));
}

#[tokio::test]
async fn unreadable_body_is_decode_error() {
    let (api, transport) = api(None);
    transport.respond(200, "<html>");

    let request = SearchRequest::derive(&SearchState::default(), Some("austin")).unwrap();
    let error = api.search_restaurants(&request).await.unwrap_err();
    assert!(matches!(error, MenuhubError::Decode(_)));
}

#[tokio::test]
async fn my_restaurant_uses_bearer_token() {
    let (api, transport) = api(Some("tok-123"));
    transport.respond(200, TACO_JSON);

    let restaurant = api.get_my_restaurant().await.unwrap().unwrap();
    assert_eq!(restaurant.restaurant_name, "Casa Taco");
    assert_eq!(restaurant.id.as_deref(), Some("r1"));

    let sent = transport.requests();
    assert_eq!(sent[0].url.as_str(), "https://api.example.com/api/my/restaurant");
    assert_eq!(sent[0].header("Authorization"), Some("Bearer tok-123"));
}

#[tokio::test]
async fn missing_restaurant_is_none() {
    let (api, transport) = api(Some("tok"));
    transport.respond(404, r#"{"message": "restaurant not found"}"#);

    assert_eq!(api.get_my_restaurant().await, Ok(None));
}

#[tokio::test]
async fn signed_out_caller_sends_nothing() {
    let (api, transport) = api(None);

    let error = api.get_my_restaurant().await.unwrap_err();
    assert!(matches!(error, MenuhubError::Auth(_)));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn update_sends_multipart_put() {
    let (api, transport) = api(Some("tok"));
    transport.respond(200, TACO_JSON);

    let restaurant = serde_json::from_str(TACO_JSON).unwrap();
    let mut form = decode(Some(&restaurant));
    form.set_image_file(ImageFile::new("new.png", "image/png", vec![7, 7]));
    let payload = encode(&form).unwrap();

    let updated = api.update_my_restaurant(payload).await.unwrap();
    assert_eq!(updated, restaurant);

    let sent = transport.requests();
    assert_eq!(sent[0].method, Method::Put);
    let RequestBody::Multipart(body) = &sent[0].body else {
        panic!("expected multipart body");
    };
    assert_eq!(body.text("deliveryPrice"), Some("299"));
    assert_eq!(body.text("menuItems[1][price]"), Some("1050"));
    assert!(!body.contains("imageUrl"));
    assert!(matches!(body.iter().last(), Some(("imageFile", FieldValue::File(_)))));
}

#[tokio::test]
async fn create_uses_post() {
    let (api, transport) = api(Some("tok"));
    transport.respond(201, TACO_JSON);

    let restaurant = serde_json::from_str(TACO_JSON).unwrap();
    let payload = encode(&decode(Some(&restaurant))).unwrap();
    api.create_my_restaurant(payload).await.unwrap();

    assert_eq!(transport.requests()[0].method, Method::Post);
}

#[tokio::test]
async fn connection_failure_propagates() {
    let (api, transport) = api(Some("tok"));
    transport.fail(MenuhubError::transport(None, "connection refused"));

    assert_eq!(
        api.get_my_restaurant().await,
        Err(MenuhubError::transport(None, "connection refused"))
    );
}
