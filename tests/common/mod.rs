use std::sync::Arc;

use payment_api::gateway::simulator::SimulatedGateway;
use payment_api::ledger::store::LedgerStore;
use payment_api::service::payment_service::PaymentService;
use payment_api::AppState;

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
}

// Binds an ephemeral port and serves the full router, so tests exercise
// the same stack a deployment would.
pub async fn spawn_app(approval_rate: f64) -> TestApp {
    let payment_service = PaymentService {
        ledger: LedgerStore::new(),
        gateway: Arc::new(SimulatedGateway::with_seed(approval_rate, 7)),
    };
    let app = payment_api::http::router::build(AppState { payment_service });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test app");
    });

    TestApp {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn create_payment(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/v1/payments"))
            .json(body)
            .send()
            .await
            .expect("create payment request")
    }

    pub async fn process_payment(&self, payment_id: &str) -> reqwest::Response {
        self.client
            .post(self.url(&format!("/api/v1/payments/{payment_id}/process")))
            .send()
            .await
            .expect("process payment request")
    }

    pub async fn refund_payment(
        &self,
        payment_id: &str,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.client
            .post(self.url(&format!("/api/v1/payments/{payment_id}/refund")))
            .json(body)
            .send()
            .await
            .expect("refund request")
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request");
        let status = response.status();
        let body = response.json().await.expect("json body");
        (status, body)
    }

    // Create + process against an app spawned with approval_rate 1.0,
    // returning the completed payment id.
    pub async fn completed_payment(&self, amount: f64) -> String {
        let response = self
            .create_payment(&serde_json::json!({
                "merchant_id": "merchant_001",
                "customer_id": "customer_001",
                "amount": amount,
                "currency": "USD",
                "payment_method": "credit_card",
                "card_last_four": "4242",
                "card_type": "visa",
            }))
            .await;
        assert_eq!(response.status(), 201);
        let body: serde_json::Value = response.json().await.expect("create body");
        let payment_id = body["payment"]["id"].as_str().expect("payment id").to_string();

        let response = self.process_payment(&payment_id).await;
        assert_eq!(response.status(), 200);
        payment_id
    }
}
