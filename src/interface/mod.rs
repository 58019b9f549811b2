pub mod export;
pub mod prompts;
pub mod render;

pub use export::write_shopping_list;
pub use prompts::{
    collect_order_request, prompt_kind, prompt_package, prompt_target, prompt_yes_no,
};
pub use render::{
    display_insights, display_order, display_plan, display_product_list, display_suggestions,
    display_verification,
};
