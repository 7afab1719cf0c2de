//! JSON-RPC wire types.

use serde::Serialize;

/// A JSON-RPC 2.0 call envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<P: Serialize> {
    jsonrpc: &'static str,
    method: &'static str,
    params: P,
    id: u32,
}

impl<P: Serialize> RpcRequest<P> {
    /// Wrap `params` in a `call` envelope.
    pub fn call(params: P, id: u32) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "call",
            params,
            id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let request = RpcRequest::call(serde_json::json!({"db": "test"}), 1);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "call");
        assert_eq!(value["params"]["db"], "test");
        assert_eq!(value["id"], 1);
    }
}
