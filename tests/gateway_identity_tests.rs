#![allow(clippy::unwrap_used, clippy::expect_used)]

use restgate::gateway::{DefaultGatewayIdentity, DefaultGatewayIdentityBuilder, GatewayIdentity};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

type Setter = fn(DefaultGatewayIdentityBuilder, &'static str) -> DefaultGatewayIdentityBuilder;
type Getter = fn(&DefaultGatewayIdentity) -> Option<&str>;

const FIELDS: [(&str, Setter, Getter); 12] = [
    ("cognitoIdentityPoolId", |b, v| b.cognito_identity_pool_id(v), |i| i.cognito_identity_pool_id()),
    ("accountId", |b, v| b.account_id(v), |i| i.account_id()),
    ("cognitoIdentityId", |b, v| b.cognito_identity_id(v), |i| i.cognito_identity_id()),
    ("caller", |b, v| b.caller(v), |i| i.caller()),
    ("apiKey", |b, v| b.api_key(v), |i| i.api_key()),
    ("sourceIp", |b, v| b.source_ip(v), |i| i.source_ip()),
    ("accessKey", |b, v| b.access_key(v), |i| i.access_key()),
    ("cognitoAuthenticationType", |b, v| b.cognito_authentication_type(v), |i| i.cognito_authentication_type()),
    ("cognitoAuthenticationProvider", |b, v| b.cognito_authentication_provider(v), |i| i.cognito_authentication_provider()),
    ("userArn", |b, v| b.user_arn(v), |i| i.user_arn()),
    ("userAgent", |b, v| b.user_agent(v), |i| i.user_agent()),
    ("user", |b, v| b.user(v), |i| i.user()),
];

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn full_identity(skip: Option<usize>, replacement: &'static str) -> DefaultGatewayIdentity {
    FIELDS
        .iter()
        .enumerate()
        .fold(DefaultGatewayIdentity::builder(), |b, (i, (name, set, _))| {
            if Some(i) == skip {
                set(b, replacement)
            } else {
                set(b, *name)
            }
        })
        .build()
}

#[test]
fn test_default_is_all_none() {
    let identity = DefaultGatewayIdentity::default();
    for (name, _, get) in FIELDS {
        assert_eq!(get(&identity), None, "{name} should be unset");
    }
}

#[test]
fn test_builder_sets_each_field() {
    let identity = full_identity(None, "");
    for (name, _, get) in FIELDS {
        assert_eq!(get(&identity), Some(name));
    }
}

#[test]
fn test_single_field_difference_is_unequal() {
    let base = full_identity(None, "");
    for i in 0..FIELDS.len() {
        let changed = full_identity(Some(i), "different");
        assert_ne!(base, changed, "field {} must take part in equality", FIELDS[i].0);

        let (_, set, _) = FIELDS[i];
        let only_one = set(DefaultGatewayIdentity::builder(), "x").build();
        assert_ne!(only_one, DefaultGatewayIdentity::default());
    }
}

#[test]
fn test_equality_and_hash_are_consistent() {
    let a = full_identity(None, "");
    let b = full_identity(None, "");
    let c = full_identity(None, "");
    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_eq!(b, c);
    assert_eq!(a, c);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_eq!(
        hash_of(&DefaultGatewayIdentity::default()),
        hash_of(&DefaultGatewayIdentity::builder().build())
    );
}

#[test]
fn test_deserializes_from_proxy_event_identity() {
    let value = serde_json::Value::Object(
        FIELDS
            .iter()
            .map(|(name, _, _)| (name.to_string(), serde_json::Value::from(*name)))
            .collect(),
    );
    let identity: DefaultGatewayIdentity = serde_json::from_value(value).unwrap();
    assert_eq!(identity, full_identity(None, ""));
}

#[test]
fn test_debug_lists_fields() {
    let debug = format!("{:?}", full_identity(None, ""));
    assert!(debug.contains("source_ip"));
    assert!(debug.contains("cognitoAuthenticationProvider"));
}
