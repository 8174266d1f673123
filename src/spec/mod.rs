//! # Spec Module
//!
//! Operation descriptors and a thin adapter that lists them from an OpenAPI 3 or
//! Swagger 2 document. Only `paths.<template>.<method>` entries are read; schema
//! validation is left to whatever produced the document.

mod load;
mod types;

pub use load::{load_operations, operations_from_value};
pub use types::{
    parse_method, OperationDescriptor, OperationMetadata, OPERATION_ID_KEY,
    ROUTER_CONTROLLER_KEYS,
};
