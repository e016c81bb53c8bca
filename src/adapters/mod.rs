//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements         | Connects to              |
//! |---------------|--------------------|--------------------------|
//! | `config_file` | ConfigPort         | JSON settings document   |
//! | `log_sink`    | EventSink          | `log` facade             |
//! | `sim`         | TelemetrySource    | Simulated engine bank    |
//! |               | CommandSink        |                          |
//! | `time`        | Clock              | Manual (replay) clock    |

pub mod config_file;
pub mod log_sink;
pub mod sim;
pub mod time;
