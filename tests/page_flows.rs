mod common;

use common::{api, search_json, TACO_JSON};
use menuhub::api::SubmitMode;
use menuhub::app::{
    handle_manage_event, handle_search_event, Action, ManageEvent, ManagePhase,
    ManageRestaurantPage, Notification, SearchEvent, SearchPage,
};
use menuhub::domain::{MinorUnits, Restaurant};
use menuhub::query::QueryStatus;
use menuhub::MenuhubError;

fn single_fetch(actions: Vec<Action>) -> menuhub::query::SearchRequest {
    match actions.as_slice() {
        [Action::FetchSearch(request)] => request.clone(),
        other => panic!("expected one fetch, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_response_for_older_query_is_suppressed() {
    let (api, transport) = api(None);
    transport.respond(200, &search_json(1));
    transport.respond(200, &search_json(2));

    let mut page = SearchPage::new(Some("austin".into()));
    let (_, actions) = handle_search_event(&mut page, &SearchEvent::Mounted).unwrap();
    let first = single_fetch(actions);
    let (_, actions) =
        handle_search_event(&mut page, &SearchEvent::QuerySubmitted("tacos".into())).unwrap();
    let second = single_fetch(actions);

    let first_outcome = api.search_restaurants(&first).await;
    let second_outcome = api.search_restaurants(&second).await;

    // The newer answer lands first; the older one must not overwrite it.
    let (render, _) = handle_search_event(
        &mut page,
        &SearchEvent::SearchCompleted { request: second, outcome: second_outcome },
    )
    .unwrap();
    assert!(render);
    let (render, _) = handle_search_event(
        &mut page,
        &SearchEvent::SearchCompleted { request: first, outcome: first_outcome },
    )
    .unwrap();
    assert!(!render);

    assert_eq!(page.results().map(|r| r.pagination.total), Some(2));
}

#[tokio::test]
async fn failed_search_is_distinct_from_empty() {
    let (api, transport) = api(None);
    transport.respond(503, "busy");

    let mut page = SearchPage::new(Some("austin".into()));
    let (_, actions) = handle_search_event(&mut page, &SearchEvent::Mounted).unwrap();
    let request = single_fetch(actions);
    let outcome = api.search_restaurants(&request).await;
    handle_search_event(&mut page, &SearchEvent::SearchCompleted { request, outcome }).unwrap();

    assert!(matches!(
        page.status(),
        QueryStatus::Failed(MenuhubError::Transport { status: Some(503), .. })
    ));
    assert!(page.results().is_none());
}

#[tokio::test]
async fn edit_existing_restaurant_round_trip() {
    let (api, transport) = api(Some("tok"));
    transport.respond(200, TACO_JSON);

    let mut page = ManageRestaurantPage::new();
    let (_, actions) = handle_manage_event(&mut page, &ManageEvent::Mounted).unwrap();
    assert_eq!(actions, vec![Action::LoadMyRestaurant]);

    let loaded = api.get_my_restaurant().await;
    handle_manage_event(&mut page, &ManageEvent::RestaurantLoaded(loaded)).unwrap();
    assert_eq!(page.phase(), ManagePhase::Editing);
    assert!((page.form().delivery_price - 2.99).abs() < f64::EPSILON);

    let mut form = page.form().clone();
    form.delivery_price = 4.5;
    handle_manage_event(&mut page, &ManageEvent::FormEdited(form)).unwrap();

    let (_, actions) = handle_manage_event(&mut page, &ManageEvent::Submit).unwrap();
    let payload = match actions.as_slice() {
        [Action::SubmitRestaurant { mode: SubmitMode::Update, payload }] => payload.clone(),
        other => panic!("expected update submit, got {other:?}"),
    };
    assert_eq!(payload.text("deliveryPrice"), Some("450"));
    assert_eq!(payload.text("menuItems[0][price]"), Some("399"));

    let mut saved: Restaurant = serde_json::from_str(TACO_JSON).unwrap();
    saved.delivery_price = MinorUnits(450);
    let (_, actions) =
        handle_manage_event(&mut page, &ManageEvent::SubmitCompleted(Ok(saved.clone()))).unwrap();

    assert_eq!(actions, vec![Action::Notify(Notification::success("Restaurant updated!"))]);
    assert_eq!(page.restaurant(), Some(&saved));
    assert!((page.form().delivery_price - 4.5).abs() < f64::EPSILON);
    assert!(page.in_flight().is_none());
}

#[tokio::test]
async fn first_create_switches_to_editing() {
    let (api, transport) = api(Some("tok"));
    transport.respond(404, "");

    let mut page = ManageRestaurantPage::new();
    handle_manage_event(&mut page, &ManageEvent::Mounted).unwrap();
    let loaded = api.get_my_restaurant().await;
    handle_manage_event(&mut page, &ManageEvent::RestaurantLoaded(loaded)).unwrap();
    assert_eq!(page.phase(), ManagePhase::Creating);

    let created: Restaurant = serde_json::from_str(TACO_JSON).unwrap();
    let mut form = page.form().clone();
    form.restaurant_name = created.restaurant_name.clone();
    form.city = created.city.clone();
    form.country = created.country.clone();
    form.delivery_price = 2.99;
    form.estimated_delivery_time = 30;
    form.toggle_cuisine("Mexican");
    form.menu_items[0].name = "Taco".into();
    form.menu_items[0].price = 3.99;
    form.image_url = created.image_url.clone();
    handle_manage_event(&mut page, &ManageEvent::FormEdited(form)).unwrap();

    let (_, actions) = handle_manage_event(&mut page, &ManageEvent::Submit).unwrap();
    assert!(matches!(
        actions.as_slice(),
        [Action::SubmitRestaurant { mode: SubmitMode::Create, .. }]
    ));
    assert_eq!(
        handle_manage_event(&mut page, &ManageEvent::Submit),
        Err(MenuhubError::SubmitInFlight)
    );

    let (_, actions) =
        handle_manage_event(&mut page, &ManageEvent::SubmitCompleted(Ok(created))).unwrap();
    assert_eq!(actions, vec![Action::Notify(Notification::success("Restaurant created!"))]);
    assert_eq!(page.phase(), ManagePhase::Editing);
}
