//! Selection flows as the product page drives them: URL query in, resolved
//! variant and picker state out, reducer actions in between.

#![allow(clippy::unwrap_used)]

use meltemi_core::{Selection, SelectionAction, selection::resolve};
use meltemi_integration_tests::{dec, tees_collection, tees_variants};

#[test]
fn landing_on_a_collection_page_shows_the_first_variant() {
    let r = resolve(&tees_variants(), &tees_collection(), &Selection::default()).unwrap();

    assert_eq!(r.variant.name, "Aegean");
    assert_eq!(r.variant.color.as_deref(), Some("navy"));
    // Collection defaults fill in what the variant leaves unset.
    assert_eq!(r.variant.price, dec("29.90"));
    assert_eq!(r.variant.sizes, vec!["S", "M", "L", "XL"]);
    assert_eq!(r.selection.size.as_deref(), Some("S"));
}

#[test]
fn deep_link_from_url_query_resolves_the_exact_variant() {
    // What the page handler gets after axum deserializes the query string.
    let selection: Selection = serde_json::from_str(
        r#"{"brand":"Meltemi","name":"Aegean","color":"white","size":"M"}"#,
    )
    .unwrap();

    let r = resolve(&tees_variants(), &tees_collection(), &selection).unwrap();
    assert_eq!(r.variant.color.as_deref(), Some("white"));
    assert_eq!(r.selection, selection);
}

#[test]
fn stale_deep_link_falls_back_instead_of_failing() {
    // A shared link can outlive the variant it pointed at.
    let selection: Selection =
        serde_json::from_str(r#"{"name":"Aegean","color":"crimson","size":"XS"}"#).unwrap();

    let r = resolve(&tees_variants(), &tees_collection(), &selection).unwrap();
    assert_eq!(r.variant.name, "Aegean");
    assert_eq!(r.selection.color.as_deref(), Some("navy"));
    assert_eq!(r.selection.size.as_deref(), Some("S"));
}

#[test]
fn picker_clicks_walk_the_reducer_and_stay_consistent() {
    let variants = tees_variants();
    let defaults = tees_collection();

    // Land, then pick a size, then switch the brand filter.
    let r = resolve(&variants, &defaults, &Selection::default()).unwrap();
    let picked_size = r.selection.apply(SelectionAction::SelectSize("L".into()));
    let r = resolve(&variants, &defaults, &picked_size).unwrap();
    assert_eq!(r.selection.size.as_deref(), Some("L"));

    let switched = r
        .selection
        .apply(SelectionAction::SelectBrand(Some("Ostria".into())));
    // Brand change clears everything below it.
    assert_eq!(switched.name, None);
    assert_eq!(switched.size, None);

    let r = resolve(&variants, &defaults, &switched).unwrap();
    assert_eq!(r.names, vec!["Vardaris"]);
    assert_eq!(r.variant.name, "Vardaris");
    assert_eq!(r.selection.color.as_deref(), Some("olive"));
    assert_eq!(r.selection.size.as_deref(), Some("S"));
}

#[test]
fn brand_list_spans_the_whole_collection_even_when_filtered() {
    let variants = tees_variants();
    let selection = Selection {
        brand: Some("Ostria".into()),
        ..Selection::default()
    };
    let r = resolve(&variants, &tees_collection(), &selection).unwrap();
    // The brand picker must still offer the way back.
    assert_eq!(r.brands, vec!["Meltemi", "Ostria"]);
}
