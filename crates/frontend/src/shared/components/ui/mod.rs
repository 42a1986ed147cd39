pub mod checkbox;
pub mod input;
pub mod textarea;

pub use checkbox::Checkbox;
pub use input::Input;
pub use textarea::Textarea;
