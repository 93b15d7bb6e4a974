// Copyright (c) 2025 - Cowboy AI, Inc.
//! Attribute normalization properties

use proptest::prelude::*;

use cim_asset_sync::AttributeUpdate;

use crate::fixtures::*;

fn attribute_name() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,15}".prop_filter("reserved fields", |name| {
        !matches!(
            name.as_str(),
            "asset" | "status" | "state" | "tag" | "type" | "location" | "pool" | "secondary_role"
        )
    })
}

fn attribute_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,20}"
}

proptest! {
    /// Property: stored values are the upper-cased request and the getter
    /// hands them back lower-cased
    #[test]
    fn prop_values_are_stored_upper_case(name in attribute_name(), value in attribute_value()) {
        let (stored, read_back) = tokio_test::block_on(async {
            let (mut ctx, _) = context();
            let server = local_server();

            ctx.set(&server, AttributeUpdate::new().with(&name, value.as_str()))
                .await
                .unwrap();

            let accessor = ctx.declare_attribute(&name);
            let read_back = accessor.get(&ctx, &server).await.unwrap();
            let stored = ctx
                .client()
                .asset(LOCAL_TAG)
                .and_then(|a| a.attribute(&name).map(str::to_string));
            (stored, read_back)
        });

        prop_assert_eq!(stored, Some(value.to_ascii_uppercase()));
        prop_assert_eq!(read_back, value.to_ascii_uppercase().to_lowercase());
    }

    /// Property: repeating an update issues no further writes
    #[test]
    fn prop_repeated_update_writes_once(name in attribute_name(), value in attribute_value()) {
        let writes = tokio_test::block_on(async {
            let (ctx, _) = context();
            let server = local_server();
            let update = AttributeUpdate::new().with(&name, value.as_str());

            ctx.set(&server, update.clone()).await.unwrap();
            ctx.set(&server, update).await.unwrap();
            ctx.client().writes().len()
        });

        prop_assert_eq!(writes, 1);
    }
}
