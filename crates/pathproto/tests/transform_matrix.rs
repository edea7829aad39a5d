use std::sync::Arc;

use pathproto::{
    EnumDescriptor, FieldType, Schema, TransformDefinition, TransformError, Transformer,
};
use serde_json::json;

fn item_definition() -> TransformDefinition {
    TransformDefinition::from_json(
        r#"{
            "item": [
                {"path": "full_item/asset_id", "field": "asset_id"},
                {"path": "full_item/title", "field": "title"},
                {"path": "full_item/view_count", "field": "views", "type": "int64"},
                {"path": "full_item/rating", "field": "rating"},
                {"path": "tags", "field": "tags"},
                {"path": "primary", "field": "primary_offer", "type": "object", "transform": "offer"},
                {"path": "offers/offer", "field": "offers", "type": "object", "transform": "offer"}
            ],
            "offer": [
                {"path": "price", "field": "amount", "type": "double"},
                {"path": "currency"},
                {"path": "available", "field": "in_stock", "type": "bool"}
            ]
        }"#,
    )
    .unwrap()
}

fn offer_schema() -> Arc<Schema> {
    Schema::builder("Offer")
        .field("amount", FieldType::Double)
        .field("currency", FieldType::String)
        .field("in_stock", FieldType::Bool)
        .build()
        .unwrap()
}

fn item_schema() -> Arc<Schema> {
    let rating = EnumDescriptor::new("Rating", [("POOR", 0), ("GOOD", 1), ("GREAT", 2)]).unwrap();
    Schema::builder("Item")
        .field("asset_id", FieldType::String)
        .field("title", FieldType::String)
        .field("views", FieldType::Int64)
        .field("rating", FieldType::Enum(rating))
        .repeated_field("tags", FieldType::String)
        .field("primary_offer", FieldType::Message(offer_schema()))
        .repeated_field("offers", FieldType::Message(offer_schema()))
        .build()
        .unwrap()
}

#[test]
fn transform_builds_a_full_item() {
    let doc = json!({
        "full_item": {
            "asset_id": "a-1837",
            "title": "desk lamp",
            "view_count": "1200",
            "rating": "GREAT"
        },
        "tags": ["new", "sale"],
        "primary": {"price": "19.99", "currency": "USD", "available": "true"},
        "offers": {
            "offer": [
                {"price": "19.99", "currency": "USD", "available": "true"},
                {"price": "9.50", "currency": "EUR", "available": "false"}
            ]
        }
    });
    let definition = item_definition();
    let message = Transformer::new(&definition)
        .build_message("item", &doc, item_schema())
        .unwrap();
    assert_eq!(
        message.to_value(),
        json!({
            "asset_id": "a-1837",
            "title": "desk lamp",
            "views": 1200,
            "rating": "GREAT",
            "tags": ["new", "sale"],
            "primary_offer": {"amount": 19.99, "currency": "USD", "in_stock": true},
            "offers": [
                {"amount": 19.99, "currency": "USD", "in_stock": true},
                {"amount": 9.5, "currency": "EUR", "in_stock": false}
            ]
        })
    );
}

#[test]
fn recoverable_conditions_leave_fields_unset() {
    let doc = json!({
        "full_item": {
            "asset_id": "a-1837",
            "view_count": "soon",
            "rating": "STELLAR"
        },
        "offers": {
            "offer": [
                {"price": "bogus", "currency": "EUR", "available": "maybe"}
            ]
        }
    });
    let definition = item_definition();
    let message = Transformer::new(&definition)
        .build_message("item", &doc, item_schema())
        .unwrap();
    // Unparseable text and the unknown enum name skip; the offer message is
    // still built from what did coerce.
    assert_eq!(
        message.to_value(),
        json!({
            "asset_id": "a-1837",
            "offers": [{"currency": "EUR"}]
        })
    );
}

#[test]
fn absent_singular_object_stays_unset() {
    let doc = json!({"full_item": {"asset_id": "a-1837"}});
    let definition = item_definition();
    let message = Transformer::new(&definition)
        .build_message("item", &doc, item_schema())
        .unwrap();
    assert_eq!(message.to_value(), json!({"asset_id": "a-1837"}));
    assert!(message.get("primary_offer").is_none());
    assert!(message.get_repeated("offers").is_none());
}

#[test]
fn null_offer_nodes_are_dropped() {
    let doc = json!({
        "offers": {
            "offer": [
                null,
                {"price": "9.50", "currency": "EUR"}
            ]
        }
    });
    let definition = item_definition();
    let message = Transformer::new(&definition)
        .build_message("item", &doc, item_schema())
        .unwrap();
    assert_eq!(
        message.to_value(),
        json!({"offers": [{"amount": 9.5, "currency": "EUR"}]})
    );
}

#[test]
fn nested_transform_must_exist() {
    let definition = TransformDefinition::from_json(
        r#"{"item": [{"path": "primary", "field": "primary_offer", "type": "object", "transform": "offer"}]}"#,
    )
    .unwrap();
    let doc = json!({"primary": {"price": "1.00"}});
    let err = Transformer::new(&definition)
        .build_message("item", &doc, item_schema())
        .unwrap_err();
    assert!(matches!(err, TransformError::UnknownTransform(name) if name == "offer"));
}

#[test]
fn unknown_target_field_in_definition_is_fatal() {
    let definition = TransformDefinition::from_json(
        r#"{"item": [{"path": "full_item/asset_id", "field": "sku"}]}"#,
    )
    .unwrap();
    let doc = json!({"full_item": {"asset_id": "a-1837"}});
    let err = Transformer::new(&definition)
        .build_message("item", &doc, item_schema())
        .unwrap_err();
    assert!(matches!(err, TransformError::Copy(_)));
}

#[test]
fn transformer_shares_one_definition_across_documents() {
    let definition = item_definition();
    let transformer = Transformer::new(&definition);
    for (asset_id, views) in [("a-1", "10"), ("a-2", "20")] {
        let doc = json!({"full_item": {"asset_id": asset_id, "view_count": views}});
        let message = transformer
            .build_message("item", &doc, item_schema())
            .unwrap();
        assert_eq!(
            message.to_value(),
            json!({"asset_id": asset_id, "views": views.parse::<i64>().unwrap()})
        );
    }
}

#[test]
fn definitions_deserialize_into_builders_without_code() {
    // A definition can come straight off disk or the wire; schemas are
    // assembled at runtime too, so the whole pipeline is configuration.
    let definition: TransformDefinition = serde_json::from_value(json!({
        "reading": [
            {"path": "meta/['sensor id']", "field": "sensor"},
            {"path": "samples", "field": "values"}
        ]
    }))
    .unwrap();
    let schema = Schema::builder("Reading")
        .field("sensor", FieldType::String)
        .repeated_field("values", FieldType::Double)
        .build()
        .unwrap();
    let doc = json!({"meta": {"sensor id": "s-9"}, "samples": [1.5, 2.5]});
    let message = Transformer::new(&definition)
        .build_message("reading", &doc, schema)
        .unwrap();
    assert_eq!(
        message.to_value(),
        json!({"sensor": "s-9", "values": [1.5, 2.5]})
    );
}
