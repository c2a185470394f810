pub mod gateway_args;
pub mod query;
pub mod query_error;
pub mod serve;
