mod progress_reader;
pub mod redirect_policy;
pub mod speechmatics_client;
