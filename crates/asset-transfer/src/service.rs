//! # Asset Transfer Service
//!
//! The chaincode value the host instantiates. It owns the configuration and
//! a function registry built once at construction.
//!
//! ## Invocation flow
//!
//! ```text
//! host ──invoke──→ get_function_and_parameters
//!                    │
//!          registry lookup ──miss──→ lenient: success / strict: error
//!                    │
//!        handler.validate → handler.execute (via Ledger)
//!                    │
//!           Ledger::flush (buffered mode)
//!                    │
//!               Response ──→ host
//! ```

use crate::config::{ChaincodeConfig, UnknownFunctionPolicy};
use crate::domain::{InvocationRequest, Payload, Response};
use crate::errors::ChaincodeError;
use crate::handlers::{Delete, Handler, Init, Query, Transfer};
use crate::ledger::Ledger;
use crate::ports::inbound::ChaincodeApi;
use crate::ports::outbound::ChaincodeStub;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

// =============================================================================
// FUNCTION REGISTRY
// =============================================================================

/// Static mapping from function name to handler.
pub struct FunctionRegistry {
    handlers: BTreeMap<&'static str, Box<dyn Handler>>,
}

impl FunctionRegistry {
    /// Builds the registry of `invoke`-reachable functions. `Init` is listed
    /// so an invoke can re-seed accounts after instantiation.
    #[must_use]
    pub fn new(config: &ChaincodeConfig) -> Self {
        let mut registry = Self {
            handlers: BTreeMap::new(),
        };
        registry.register(Init);
        registry.register(Transfer::new(config.allow_zero_amount));
        registry.register(Query);
        registry.register(Delete);
        registry
    }

    fn register(&mut self, handler: impl Handler + 'static) {
        self.handlers.insert(handler.name(), Box::new(handler));
    }

    /// Looks up a handler by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Handler> {
        self.handlers.get(name).map(|handler| &**handler)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }
}

// =============================================================================
// CHAINCODE
// =============================================================================

/// The asset transfer chaincode.
pub struct AssetTransferChaincode {
    config: ChaincodeConfig,
    registry: FunctionRegistry,
}

impl Default for AssetTransferChaincode {
    fn default() -> Self {
        Self::new(ChaincodeConfig::default())
    }
}

impl AssetTransferChaincode {
    /// Creates the chaincode and its registry.
    #[must_use]
    pub fn new(config: ChaincodeConfig) -> Self {
        let registry = FunctionRegistry::new(&config);
        Self { config, registry }
    }

    /// Names reachable through `invoke`, sorted.
    #[must_use]
    pub fn registered_functions(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    async fn run_handler(
        &self,
        handler: &dyn Handler,
        request: &InvocationRequest,
        stub: &dyn ChaincodeStub,
        cancel: &CancellationToken,
    ) -> Result<Payload, ChaincodeError> {
        let mut ledger = Ledger::new(stub, cancel, self.config.write_mode);
        let payload = handler.handle(&request.params, &mut ledger).await?;
        ledger.flush().await?;
        Ok(payload)
    }

    async fn dispatch(
        &self,
        request: &InvocationRequest,
        stub: &dyn ChaincodeStub,
        cancel: &CancellationToken,
    ) -> Result<Payload, ChaincodeError> {
        let Some(handler) = self.registry.get(&request.function) else {
            info!(function = %request.function, "no method of name: {} found", request.function);
            return match self.config.unknown_function {
                UnknownFunctionPolicy::Lenient => Ok(None),
                UnknownFunctionPolicy::Strict => Err(ChaincodeError::UnknownFunction {
                    name: request.function.clone(),
                }),
            };
        };
        self.run_handler(handler, request, stub, cancel).await
    }
}

fn encode(outcome: Result<Payload, ChaincodeError>) -> Response {
    match &outcome {
        Ok(payload) => debug!(
            payload_len = payload.as_ref().map_or(0, Vec::len),
            "Invocation succeeded"
        ),
        Err(err) => warn!(
            kind = ?err.kind(),
            validation = err.is_validation(),
            error = %err,
            "Invocation failed"
        ),
    }
    Response::from_outcome(outcome)
}

#[async_trait]
impl ChaincodeApi for AssetTransferChaincode {
    #[instrument(skip_all, fields(tx_id = %stub.tx_id()))]
    async fn init(&self, stub: &dyn ChaincodeStub, cancel: &CancellationToken) -> Response {
        info!("========= {} Init =========", crate::CHAINCODE_NAME);
        let request = stub.get_function_and_parameters();
        info!(function = %request.function, params = ?request.params, "Init request");
        encode(self.run_handler(&Init, &request, stub, cancel).await)
    }

    #[instrument(skip_all, fields(tx_id = %stub.tx_id()))]
    async fn invoke(&self, stub: &dyn ChaincodeStub, cancel: &CancellationToken) -> Response {
        let request = stub.get_function_and_parameters();
        info!(function = %request.function, params = ?request.params, "Invoke request");
        encode(self.dispatch(&request, stub, cancel).await)
    }
}

// =============================================================================
// TESTS
// =============================================================================
