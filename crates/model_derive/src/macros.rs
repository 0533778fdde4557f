pub(crate) mod api_model;
pub(crate) mod helpers;

pub(crate) use self::api_model::api_model_inner;
