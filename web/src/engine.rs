use memory_match_protocol::{self as protocol, EngineError, MoveReply, MoveRequest, StartReply};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// HTTP client for the remote game engine.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct EngineClient {
    endpoint: String,
}

impl EngineClient {
    pub(crate) fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    pub(crate) async fn start(&self) -> protocol::Result<StartReply> {
        let body = self.post(protocol::START_PATH, None).await?;
        protocol::decode_start(&body)
    }

    pub(crate) async fn make_move(&self, request: MoveRequest) -> protocol::Result<MoveReply> {
        let payload = protocol::encode_move(&request)?;
        let body = self.post(protocol::MOVE_PATH, Some(payload)).await?;
        protocol::decode_move(&body)
    }

    async fn post(&self, path: &str, payload: Option<String>) -> protocol::Result<String> {
        let url = self.url(path);
        log::debug!("POST {} {:?}", url, payload);

        let init = RequestInit::new();
        init.set_method("POST");
        if let Some(payload) = payload {
            init.set_body(&JsValue::from_str(&payload));
        }
        let request = Request::new_with_str_and_init(&url, &init).map_err(transport)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(transport)?;

        let response = JsFuture::from(gloo::utils::window().fetch_with_request(&request))
            .await
            .map_err(transport)?;
        let response: Response = response.dyn_into().map_err(transport)?;
        check_status(response.ok(), response.status())?;

        let body = JsFuture::from(response.text().map_err(transport)?)
            .await
            .map_err(transport)?;
        body.as_string()
            .ok_or_else(|| EngineError::Malformed("response body is not text".to_string()))
    }
}

/// Any status outside of 2xx fails the call, whatever the body says.
fn check_status(ok: bool, status: u16) -> protocol::Result<()> {
    if ok {
        Ok(())
    } else {
        Err(EngineError::Status(status))
    }
}

fn transport(err: JsValue) -> EngineError {
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    EngineError::Transport(message)
}
