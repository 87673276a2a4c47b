pub mod lambda_context;
