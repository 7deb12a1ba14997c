pub mod datetime;
pub mod shell;

pub use datetime::{
    format_display_date, instant_to_local, local_to_instant, parse_local_input,
    DISPLAY_DATE_FORMAT, LOCAL_INPUT_FORMAT,
};
pub use shell::{AppointmentForm, FormMode};
