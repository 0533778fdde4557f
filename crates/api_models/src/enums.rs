pub use common_enums::*;
pub use common_utils::api_enum::ApiEnum;
