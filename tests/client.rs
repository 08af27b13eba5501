use rosetta_client::client::Error;
use rosetta_client::types::*;
use rosetta_client::{
    ClientConfig, RosettaClient, RosettaVersion, V1_4_1, V1_4_8, VersionedClient, select_client,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn network() -> NetworkIdentifier {
    NetworkIdentifier::new("bitcoin", "testnet3")
}

fn account() -> AccountIdentifier {
    AccountIdentifier::new("tb1qexample")
}

fn public_key() -> PublicKey {
    PublicKey {
        hex_bytes: "02abcdef".to_string(),
        curve_type: CurveType::Secp256k1,
    }
}

fn transfer(index: i64) -> Operation {
    Operation {
        operation_identifier: OperationIdentifier {
            index,
            network_index: None,
        },
        related_operations: None,
        r#type: "TRANSFER".to_string(),
        status: None,
        account: Some(account()),
        amount: Some(Amount::new("-1000", Currency::new("tBTC", 8))),
        coin_change: None,
        metadata: None,
    }
}

fn block_identifier(index: i64) -> Value {
    json!({ "index": index, "hash": format!("hash{index}") })
}

fn transaction() -> Value {
    json!({ "transaction_identifier": { "hash": "tx1" }, "operations": [] })
}

async fn mount(server: &MockServer, endpoint: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

// ── Request/response plumbing ───────────────────────────────────────────

#[tokio::test]
async fn block_posts_request_and_returns_body_verbatim() {
    init_tracing();
    let server = MockServer::start().await;

    let request = BlockRequest::new(network(), PartialBlockIdentifier::at_index(1000));
    let body = json!({
        "block": {
            "block_identifier": block_identifier(1000),
            "parent_block_identifier": block_identifier(999),
            "timestamp": 1_600_000_000_000_i64,
            "transactions": [transaction()]
        },
        "other_transactions": [{ "hash": "tx2" }]
    });

    Mock::given(method("POST"))
        .and(path("/block"))
        .and(header("content-type", "application/json"))
        .and(body_json(&request))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = RosettaClient::<V1_4_8>::new(server.uri());
    let response = client.block(request).await.unwrap();

    assert_eq!(serde_json::to_value(&response).unwrap(), body);
    assert_eq!(response.block.unwrap().block_identifier.index, 1000);
}

#[tokio::test]
async fn base_url_path_prefix_is_preserved() {
    init_tracing();
    let server = MockServer::start().await;
    mount(&server, "/v1/network/list", json!({ "network_identifiers": [] })).await;

    let client = RosettaClient::<V1_4_1>::new(format!("{}/v1/", server.uri()));
    let response = client.network_list(MetadataRequest::default()).await.unwrap();
    assert!(response.network_identifiers.is_empty());
}

#[tokio::test]
async fn every_v1_4_8_endpoint_posts_once_to_its_path() {
    init_tracing();
    let server = MockServer::start().await;

    let balance = json!({ "block_identifier": block_identifier(1), "balances": [] });
    let tx_id = json!({ "transaction_identifier": { "hash": "tx1" } });
    mount(&server, "/account/balance", balance).await;
    mount(
        &server,
        "/account/coins",
        json!({ "block_identifier": block_identifier(1), "coins": [] }),
    )
    .await;
    mount(&server, "/block", json!({})).await;
    mount(&server, "/block/transaction", json!({ "transaction": transaction() })).await;
    mount(&server, "/network/list", json!({ "network_identifiers": [] })).await;
    mount(
        &server,
        "/network/options",
        json!({
            "version": { "rosetta_version": "1.4.8", "node_version": "1.0.0" },
            "allow": {
                "operation_statuses": [],
                "operation_types": [],
                "errors": [],
                "historical_balance_lookup": false
            }
        }),
    )
    .await;
    mount(
        &server,
        "/network/status",
        json!({
            "current_block_identifier": block_identifier(10),
            "current_block_timestamp": 0,
            "genesis_block_identifier": block_identifier(0),
            "peers": []
        }),
    )
    .await;
    mount(&server, "/mempool", json!({ "transaction_identifiers": [] })).await;
    mount(&server, "/mempool/transaction", json!({ "transaction": transaction() })).await;
    mount(&server, "/construction/combine", json!({ "signed_transaction": "signed" })).await;
    mount(
        &server,
        "/construction/derive",
        json!({ "account_identifier": { "address": "tb1qderived" } }),
    )
    .await;
    mount(&server, "/construction/hash", tx_id.clone()).await;
    mount(&server, "/construction/metadata", json!({ "metadata": {} })).await;
    mount(&server, "/construction/parse", json!({ "operations": [] })).await;
    mount(
        &server,
        "/construction/payloads",
        json!({ "unsigned_transaction": "unsigned", "payloads": [] }),
    )
    .await;
    mount(&server, "/construction/preprocess", json!({})).await;
    mount(&server, "/construction/submit", tx_id).await;

    let client = RosettaClient::<V1_4_8>::new(server.uri());

    client
        .account_balance(v1_4_8::AccountBalanceRequest {
            network_identifier: network(),
            account_identifier: account(),
            block_identifier: None,
            currencies: None,
        })
        .await
        .unwrap();
    client
        .account_coins(v1_4_8::AccountCoinsRequest {
            network_identifier: network(),
            account_identifier: account(),
            include_mempool: true,
            currencies: None,
        })
        .await
        .unwrap();
    client
        .block(BlockRequest::new(network(), PartialBlockIdentifier::current()))
        .await
        .unwrap();
    client
        .block_transaction(BlockTransactionRequest {
            network_identifier: network(),
            block_identifier: BlockIdentifier {
                index: 1,
                hash: "hash1".to_string(),
            },
            transaction_identifier: TransactionIdentifier {
                hash: "tx1".to_string(),
            },
        })
        .await
        .unwrap();
    client
        .network_list(MetadataRequest::default())
        .await
        .unwrap();
    client
        .network_options(NetworkRequest::new(network()))
        .await
        .unwrap();
    client
        .network_status(NetworkRequest::new(network()))
        .await
        .unwrap();
    client.mempool(NetworkRequest::new(network())).await.unwrap();
    client
        .mempool_transaction(MempoolTransactionRequest {
            network_identifier: network(),
            transaction_identifier: TransactionIdentifier {
                hash: "tx1".to_string(),
            },
        })
        .await
        .unwrap();
    client
        .construction_combine(ConstructionCombineRequest {
            network_identifier: network(),
            unsigned_transaction: "unsigned".to_string(),
            signatures: vec![Signature {
                signing_payload: SigningPayload {
                    address: None,
                    account_identifier: Some(account()),
                    hex_bytes: "deadbeef".to_string(),
                    signature_type: Some(SignatureType::Ecdsa),
                },
                public_key: public_key(),
                signature_type: SignatureType::Ecdsa,
                hex_bytes: "cafebabe".to_string(),
            }],
        })
        .await
        .unwrap();
    let derived = client
        .construction_derive(ConstructionDeriveRequest {
            network_identifier: network(),
            public_key: public_key(),
            metadata: None,
        })
        .await
        .unwrap();
    assert_eq!(derived.derived_address(), Some("tb1qderived"));
    client
        .construction_hash(ConstructionHashRequest {
            network_identifier: network(),
            signed_transaction: "signed".to_string(),
        })
        .await
        .unwrap();
    client
        .construction_metadata(ConstructionMetadataRequest {
            network_identifier: network(),
            options: Metadata::new(),
            public_keys: Some(vec![public_key()]),
        })
        .await
        .unwrap();
    client
        .construction_parse(ConstructionParseRequest {
            network_identifier: network(),
            signed: false,
            transaction: "unsigned".to_string(),
        })
        .await
        .unwrap();
    client
        .construction_payloads(ConstructionPayloadsRequest {
            network_identifier: network(),
            operations: vec![transfer(0)],
            metadata: None,
            public_keys: None,
        })
        .await
        .unwrap();
    client
        .construction_preprocess(ConstructionPreprocessRequest {
            network_identifier: network(),
            operations: vec![transfer(0)],
            metadata: None,
            max_fee: None,
            suggested_fee_multiplier: Some(1.5),
        })
        .await
        .unwrap();
    client
        .construction_submit(ConstructionSubmitRequest {
            network_identifier: network(),
            signed_transaction: "signed".to_string(),
        })
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, RosettaVersion::V1_4_8.endpoints());
    assert!(requests.iter().all(|r| r.method.as_str() == "POST"));
}

#[tokio::test]
async fn request_body_is_forwarded_verbatim() {
    init_tracing();
    let server = MockServer::start().await;
    mount(
        &server,
        "/construction/preprocess",
        json!({ "options": { "fee_rate": 12 } }),
    )
    .await;

    let request = ConstructionPreprocessRequest {
        network_identifier: network(),
        operations: vec![transfer(0), transfer(1)],
        metadata: None,
        max_fee: Some(vec![Amount::new("500", Currency::new("tBTC", 8))]),
        suggested_fee_multiplier: None,
    };

    let client = RosettaClient::<V1_4_8>::new(server.uri());
    let response = client.construction_preprocess(request.clone()).await.unwrap();
    assert_eq!(response.options.unwrap()["fee_rate"], 12);

    let requests = server.received_requests().await.unwrap();
    let sent: Value = requests[0].body_json().unwrap();
    assert_eq!(sent, serde_json::to_value(&request).unwrap());
    assert!(sent.get("suggested_fee_multiplier").is_none());
}

// ── Schema generations ──────────────────────────────────────────────────

#[tokio::test]
async fn v1_4_1_balance_includes_inline_coins() {
    init_tracing();
    let server = MockServer::start().await;
    let coin_amount = json!({ "value": "1000", "currency": { "symbol": "tBTC", "decimals": 8 } });
    mount(
        &server,
        "/account/balance",
        json!({
            "block_identifier": block_identifier(7),
            "balances": [coin_amount.clone()],
            "coins": [{ "coin_identifier": { "identifier": "tx1:0" }, "amount": coin_amount }]
        }),
    )
    .await;

    let client = RosettaClient::<V1_4_1>::new(server.uri());
    let response = client
        .account_balance(v1_4_1::AccountBalanceRequest {
            network_identifier: network(),
            account_identifier: account(),
            block_identifier: Some(PartialBlockIdentifier::at_index(7)),
        })
        .await
        .unwrap();

    assert_eq!(response.coins.unwrap()[0].coin_identifier.identifier, "tx1:0");
    assert_eq!(
        response.balances[0].to_decimal_string().as_deref(),
        Some("0.00001000")
    );

    let requests = server.received_requests().await.unwrap();
    let sent: Value = requests[0].body_json().unwrap();
    assert_eq!(sent["network_identifier"]["blockchain"], "bitcoin");
    assert_eq!(sent["account_identifier"]["address"], "tb1qexample");
    assert_eq!(sent["block_identifier"], json!({ "index": 7 }));
}

#[tokio::test]
async fn v1_4_1_parse_returns_address_signers() {
    init_tracing();
    let server = MockServer::start().await;
    mount(
        &server,
        "/construction/parse",
        json!({ "operations": [], "signers": ["tb1qsigner"] }),
    )
    .await;

    let client = RosettaClient::<V1_4_1>::new(server.uri());
    let parsed = client
        .construction_parse(ConstructionParseRequest {
            network_identifier: network(),
            signed: true,
            transaction: "signed".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(parsed.signers, Some(vec!["tb1qsigner".to_string()]));
}

#[tokio::test]
async fn unrecognized_signature_type_is_kept() {
    init_tracing();
    let server = MockServer::start().await;
    mount(
        &server,
        "/construction/payloads",
        json!({
            "unsigned_transaction": "unsigned",
            "payloads": [{
                "account_identifier": { "address": "tb1qexample" },
                "hex_bytes": "deadbeef",
                "signature_type": "schnorr_bip340"
            }]
        }),
    )
    .await;

    let client = RosettaClient::<V1_4_8>::new(server.uri());
    let response = client
        .construction_payloads(ConstructionPayloadsRequest {
            network_identifier: network(),
            operations: vec![transfer(0)],
            metadata: None,
            public_keys: None,
        })
        .await
        .unwrap();
    assert_eq!(
        response.payloads[0].signature_type,
        Some(SignatureType::Other("schnorr_bip340".to_string()))
    );
}

#[tokio::test]
async fn selected_client_reaches_the_server() {
    init_tracing();
    let server = MockServer::start().await;
    mount(&server, "/mempool", json!({ "transaction_identifiers": [{ "hash": "tx9" }] })).await;

    let selected = select_client("1.4.1", ClientConfig::new(server.uri())).unwrap();
    let VersionedClient::V1_4_1(client) = selected else {
        panic!("expected a v1.4.1 client");
    };
    let mempool = client.mempool(NetworkRequest::new(network())).await.unwrap();
    assert_eq!(mempool.transaction_identifiers[0].hash, "tx9");
}

#[tokio::test]
async fn custom_http_client_survives_conversion_to_versioned() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/network/list"))
        .and(header("user-agent", "rosetta-client-tests/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "network_identifiers": [{ "blockchain": "bitcoin", "network": "testnet3" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let http = reqwest::Client::builder()
        .user_agent("rosetta-client-tests/1.0")
        .build()
        .unwrap();
    let client = RosettaClient::<V1_4_8>::new(server.uri()).with_http_client(http);
    let versioned: VersionedClient = client.into();
    assert_eq!(versioned.version(), RosettaVersion::V1_4_8);
    assert_eq!(versioned.base_url(), server.uri());

    let response = versioned
        .as_v1_4_8()
        .unwrap()
        .network_list(MetadataRequest::default())
        .await
        .unwrap();
    assert_eq!(response.network_identifiers, vec![network()]);

    let older: VersionedClient = RosettaClient::<V1_4_1>::new(server.uri()).into();
    assert_eq!(older.version(), RosettaVersion::V1_4_1);
    assert!(older.as_v1_4_8().is_none());
}

// ── Headers ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn configured_headers_are_attached() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/network/list"))
        .and(header("X-Api-Key", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "network_identifiers": [{ "blockchain": "bitcoin", "network": "testnet3" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri()).with_header("X-Api-Key", "abc");
    let client = RosettaClient::<V1_4_8>::from_config(config).unwrap();
    let response = client.network_list(MetadataRequest::default()).await.unwrap();
    assert_eq!(response.network_identifiers, vec![network()]);
}

#[tokio::test]
async fn no_headers_configured_means_none_sent() {
    init_tracing();
    let server = MockServer::start().await;
    mount(&server, "/network/list", json!({ "network_identifiers": [] })).await;

    let config = ClientConfig::new(server.uri()).with_headers(Some(Default::default()));
    let client = RosettaClient::<V1_4_8>::from_config(config).unwrap();
    client.network_list(MetadataRequest::default()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("x-api-key").is_none());
}

// ── Failures ────────────────────────────────────────────────────────────

#[tokio::test]
async fn non_success_status_is_returned_with_body() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/account/balance"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": 12,
            "message": "Invalid account format",
            "retriable": false,
            "details": { "address": "tb1qexample" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = RosettaClient::<V1_4_8>::new(server.uri());
    let err = client
        .account_balance(v1_4_8::AccountBalanceRequest {
            network_identifier: network(),
            account_identifier: account(),
            block_identifier: None,
            currencies: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    let api_error = err.api_error().expect("rosetta error body");
    assert_eq!(api_error.code, 12);
    assert_eq!(api_error.message, "Invalid account format");
    assert!(!err.is_retriable());
}

#[tokio::test]
async fn undecodable_success_body_is_a_json_error() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/network/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = RosettaClient::<V1_4_8>::new(server.uri());
    let err = client
        .network_status(NetworkRequest::new(network()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)), "got {err:?}");
}

#[tokio::test]
async fn connection_refused_surfaces_transport_error() {
    init_tracing();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RosettaClient::<V1_4_1>::new(format!("http://{addr}"));
    let err = client
        .construction_submit(ConstructionSubmitRequest {
            network_identifier: network(),
            signed_transaction: "signed".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        Error::Http(inner) => assert!(inner.is_connect(), "got {inner:?}"),
        other => panic!("expected transport error, got {other:?}"),
    }
}

// ── Concurrency ─────────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_calls_on_cloned_clients_are_independent() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/construction/hash"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transaction_identifier": { "hash": "tx1" }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = RosettaClient::<V1_4_8>::new(server.uri());
    let other = client.clone();
    let request = ConstructionHashRequest {
        network_identifier: network(),
        signed_transaction: "signed".to_string(),
    };

    let (first, second) = tokio::join!(
        client.construction_hash(request.clone()),
        tokio::spawn(async move { other.construction_hash(request).await }),
    );
    assert_eq!(first.unwrap().transaction_identifier.hash, "tx1");
    assert_eq!(second.unwrap().unwrap().transaction_identifier.hash, "tx1");
}
