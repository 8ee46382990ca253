pub use crate::UserData;

pub type Error = anyhow::Error;

/// Calling this Res is a workaround for poise's macros relying on Result being std::result::Result.
pub type Res<T> = anyhow::Result<T>;

pub type Ctx<'a> = poise::Context<'a, UserData, Error>;
