//! Order placement, stock reservation, and ownership through the API.

#![allow(clippy::unwrap_used)]

use vendstock_integration_tests::{TestApi, data, error_code};

async fn create_client(api: &TestApi, token: &str, email: &str) -> String {
    let mutation = format!(
        r#"mutation {{
            createClient(input: {{
                firstName: "Grace"
                lastName: "Hopper"
                company: "Acme"
                email: "{email}"
            }}) {{ id }}
        }}"#
    );
    let resp = api.execute_as(&mutation, token).await;
    assert!(resp.errors.is_empty(), "{:?}", resp.errors);
    data(&resp)["createClient"]["id"]
        .as_str()
        .unwrap()
        .to_owned()
}

async fn create_product(api: &TestApi, token: &str, name: &str, stock: u32) -> String {
    let mutation = format!(
        r#"mutation {{
            createProduct(input: {{ name: "{name}", stock: {stock}, price: "19.99" }}) {{ id }}
        }}"#
    );
    let resp = api.execute_as(&mutation, token).await;
    assert!(resp.errors.is_empty(), "{:?}", resp.errors);
    data(&resp)["createProduct"]["id"]
        .as_str()
        .unwrap()
        .to_owned()
}

async fn stock_of(api: &TestApi, product_id: &str) -> u64 {
    let query = format!(r#"query {{ getProduct(id: "{product_id}") {{ stock }} }}"#);
    let resp = api.execute(&query).await;
    assert!(resp.errors.is_empty(), "{:?}", resp.errors);
    data(&resp)["getProduct"]["stock"].as_u64().unwrap()
}

#[tokio::test]
async fn test_order_decrements_stock_and_defaults_to_pending() {
    let api = TestApi::new();
    let token = api.register_vendor("vendor@example.com").await;
    let client = create_client(&api, &token, "grace@example.com").await;
    let product = create_product(&api, &token, "Widget", 5).await;

    let mutation = format!(
        r#"mutation {{
            createOrder(input: {{
                details: [{{ productId: "{product}", quantity: 3 }}]
                total: "59.97"
                client: "{client}"
            }}) {{ id status client details {{ productId quantity }} }}
        }}"#
    );
    let resp = api.execute_as(&mutation, &token).await;
    assert!(resp.errors.is_empty(), "{:?}", resp.errors);
    let order = data(&resp);
    assert_eq!(order["createOrder"]["status"], "PENDING");
    assert_eq!(order["createOrder"]["client"], client.as_str());
    assert_eq!(order["createOrder"]["details"][0]["quantity"], 3);

    assert_eq!(stock_of(&api, &product).await, 2);
}

#[tokio::test]
async fn test_caller_supplied_status_is_kept() {
    let api = TestApi::new();
    let token = api.register_vendor("vendor@example.com").await;
    let client = create_client(&api, &token, "grace@example.com").await;
    let product = create_product(&api, &token, "Widget", 5).await;

    let mutation = format!(
        r#"mutation {{
            createOrder(input: {{
                details: [{{ productId: "{product}", quantity: 1 }}]
                total: "19.99"
                client: "{client}"
                status: COMPLETED
            }}) {{ status }}
        }}"#
    );
    let resp = api.execute_as(&mutation, &token).await;
    assert!(resp.errors.is_empty(), "{:?}", resp.errors);
    assert_eq!(data(&resp)["createOrder"]["status"], "COMPLETED");
}

#[tokio::test]
async fn test_insufficient_stock_rejects_the_order() {
    let api = TestApi::new();
    let token = api.register_vendor("vendor@example.com").await;
    let client = create_client(&api, &token, "grace@example.com").await;
    let product = create_product(&api, &token, "Widget", 5).await;

    let mutation = format!(
        r#"mutation {{
            createOrder(input: {{
                details: [{{ productId: "{product}", quantity: 6 }}]
                total: "119.94"
                client: "{client}"
            }}) {{ id }}
        }}"#
    );
    let resp = api.execute_as(&mutation, &token).await;
    assert_eq!(error_code(&resp).as_deref(), Some("INSUFFICIENT_STOCK"));

    // Nothing was reserved and no order was recorded
    assert_eq!(stock_of(&api, &product).await, 5);
    let resp = api
        .execute_as("query { getOrdersVendor { id } }", &token)
        .await;
    assert!(resp.errors.is_empty(), "{:?}", resp.errors);
    let orders = data(&resp);
    assert_eq!(orders["getOrdersVendor"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_failed_line_keeps_earlier_decrements() {
    let api = TestApi::new();
    let token = api.register_vendor("vendor@example.com").await;
    let client = create_client(&api, &token, "grace@example.com").await;
    let widget = create_product(&api, &token, "Widget", 5).await;
    let gadget = create_product(&api, &token, "Gadget", 1).await;

    let mutation = format!(
        r#"mutation {{
            createOrder(input: {{
                details: [
                    {{ productId: "{widget}", quantity: 2 }}
                    {{ productId: "{gadget}", quantity: 4 }}
                ]
                total: "100.00"
                client: "{client}"
            }}) {{ id }}
        }}"#
    );
    let resp = api.execute_as(&mutation, &token).await;
    assert_eq!(error_code(&resp).as_deref(), Some("INSUFFICIENT_STOCK"));

    // Lines are reserved one at a time: the first line's decrement sticks
    // even though the order itself was never recorded.
    assert_eq!(stock_of(&api, &widget).await, 3);
    assert_eq!(stock_of(&api, &gadget).await, 1);
}

#[tokio::test]
async fn test_atomic_reservation_leaves_stock_untouched_on_failure() {
    let api = TestApi::with_atomic_reservation();
    let token = api.register_vendor("vendor@example.com").await;
    let client = create_client(&api, &token, "grace@example.com").await;
    let widget = create_product(&api, &token, "Widget", 5).await;
    let gadget = create_product(&api, &token, "Gadget", 1).await;

    let mutation = format!(
        r#"mutation {{
            createOrder(input: {{
                details: [
                    {{ productId: "{widget}", quantity: 2 }}
                    {{ productId: "{gadget}", quantity: 4 }}
                ]
                total: "100.00"
                client: "{client}"
            }}) {{ id }}
        }}"#
    );
    let resp = api.execute_as(&mutation, &token).await;
    assert_eq!(error_code(&resp).as_deref(), Some("INSUFFICIENT_STOCK"));

    assert_eq!(stock_of(&api, &widget).await, 5);
    assert_eq!(stock_of(&api, &gadget).await, 1);
}

#[tokio::test]
async fn test_ordering_for_another_vendors_client_is_unauthorized() {
    let api = TestApi::new();
    let token_a = api.register_vendor("a@example.com").await;
    let token_b = api.register_vendor("b@example.com").await;
    let client = create_client(&api, &token_a, "grace@example.com").await;
    let product = create_product(&api, &token_a, "Widget", 5).await;

    let mutation = format!(
        r#"mutation {{
            createOrder(input: {{
                details: [{{ productId: "{product}", quantity: 1 }}]
                total: "19.99"
                client: "{client}"
            }}) {{ id }}
        }}"#
    );
    let resp = api.execute_as(&mutation, &token_b).await;
    assert_eq!(error_code(&resp).as_deref(), Some("UNAUTHORIZED"));
    assert_eq!(stock_of(&api, &product).await, 5);
}

#[tokio::test]
async fn test_unknown_client_yields_not_found() {
    let api = TestApi::new();
    let token = api.register_vendor("vendor@example.com").await;
    let product = create_product(&api, &token, "Widget", 5).await;

    let mutation = format!(
        r#"mutation {{
            createOrder(input: {{
                details: [{{ productId: "{product}", quantity: 1 }}]
                total: "19.99"
                client: "00000000-0000-0000-0000-000000000000"
            }}) {{ id }}
        }}"#
    );
    let resp = api.execute_as(&mutation, &token).await;
    assert_eq!(error_code(&resp).as_deref(), Some("NOT_FOUND"));
}

#[tokio::test]
async fn test_unknown_product_line_yields_not_found() {
    let api = TestApi::new();
    let token = api.register_vendor("vendor@example.com").await;
    let client = create_client(&api, &token, "grace@example.com").await;

    let mutation = format!(
        r#"mutation {{
            createOrder(input: {{
                details: [{{ productId: "00000000-0000-0000-0000-000000000000", quantity: 1 }}]
                total: "19.99"
                client: "{client}"
            }}) {{ id }}
        }}"#
    );
    let resp = api.execute_as(&mutation, &token).await;
    assert_eq!(error_code(&resp).as_deref(), Some("NOT_FOUND"));
}

#[tokio::test]
async fn test_total_round_trips_through_fetch() {
    let api = TestApi::new();
    let token = api.register_vendor("vendor@example.com").await;
    let client = create_client(&api, &token, "grace@example.com").await;
    let product = create_product(&api, &token, "Widget", 5).await;

    let mutation = format!(
        r#"mutation {{
            createOrder(input: {{
                details: [{{ productId: "{product}", quantity: 2 }}]
                total: "39.98"
                client: "{client}"
            }}) {{ id total }}
        }}"#
    );
    let resp = api.execute_as(&mutation, &token).await;
    assert!(resp.errors.is_empty(), "{:?}", resp.errors);
    let created = data(&resp);
    let id = created["createOrder"]["id"].as_str().unwrap();

    let query = format!(r#"query {{ getOrder(id: "{id}") {{ total vendor }} }}"#);
    let resp = api.execute_as(&query, &token).await;
    assert!(resp.errors.is_empty(), "{:?}", resp.errors);
    let fetched = data(&resp);
    assert_eq!(fetched["getOrder"]["total"], created["createOrder"]["total"]);
}

#[tokio::test]
async fn test_vendor_order_listing_is_scoped() {
    let api = TestApi::new();
    let token_a = api.register_vendor("a@example.com").await;
    let token_b = api.register_vendor("b@example.com").await;
    let client_a = create_client(&api, &token_a, "one@example.com").await;
    let client_b = create_client(&api, &token_b, "two@example.com").await;
    let product = create_product(&api, &token_a, "Widget", 10).await;

    for (client, token) in [(&client_a, &token_a), (&client_b, &token_b)] {
        let mutation = format!(
            r#"mutation {{
                createOrder(input: {{
                    details: [{{ productId: "{product}", quantity: 1 }}]
                    total: "19.99"
                    client: "{client}"
                }}) {{ id }}
            }}"#
        );
        let resp = api.execute_as(&mutation, token).await;
        assert!(resp.errors.is_empty(), "{:?}", resp.errors);
    }

    let resp = api
        .execute_as("query { getOrdersVendor { id } }", &token_a)
        .await;
    assert!(resp.errors.is_empty(), "{:?}", resp.errors);
    let mine = data(&resp);
    assert_eq!(mine["getOrdersVendor"].as_array().unwrap().len(), 1);

    let resp = api.execute("query { getOrders { id } }").await;
    assert!(resp.errors.is_empty(), "{:?}", resp.errors);
    let all = data(&resp);
    assert_eq!(all["getOrders"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_cross_vendor_order_fetch_is_unauthorized() {
    let api = TestApi::new();
    let token_a = api.register_vendor("a@example.com").await;
    let token_b = api.register_vendor("b@example.com").await;
    let client = create_client(&api, &token_a, "grace@example.com").await;
    let product = create_product(&api, &token_a, "Widget", 5).await;

    let mutation = format!(
        r#"mutation {{
            createOrder(input: {{
                details: [{{ productId: "{product}", quantity: 1 }}]
                total: "19.99"
                client: "{client}"
            }}) {{ id }}
        }}"#
    );
    let resp = api.execute_as(&mutation, &token_a).await;
    assert!(resp.errors.is_empty(), "{:?}", resp.errors);
    let created = data(&resp);
    let id = created["createOrder"]["id"].as_str().unwrap();

    let query = format!(r#"query {{ getOrder(id: "{id}") {{ id }} }}"#);
    let resp = api.execute_as(&query, &token_b).await;
    assert_eq!(error_code(&resp).as_deref(), Some("UNAUTHORIZED"));
}
