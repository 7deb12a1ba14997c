pub mod config;

pub use config::{
    CascadeConfig, FormConfig, LookupStrategy, Messages, RestConfig, SchedulerConfig,
};
