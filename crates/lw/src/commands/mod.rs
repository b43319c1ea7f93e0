//! CLI command implementations.

pub(crate) mod lotto;
pub(crate) mod serve;

pub(crate) use lotto::LottoArgs;
pub(crate) use serve::ServeArgs;
