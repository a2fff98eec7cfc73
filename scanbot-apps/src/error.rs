use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("scanbot-apps: Failed to parse {:?} as toml ({}).", .0, .1)]
    TomlParseFailure(PathBuf, #[source] toml::de::Error),
    #[error("scanbot-apps: No File {:?} is found ({}).", .0, .1)]
    NoFile(PathBuf, #[source] std::io::Error),
    #[error("scanbot-apps: {}", .0)]
    Io(#[from] std::io::Error),
    #[error("scanbot-apps: scanbot: {:?}", .0)]
    Scanbot(#[from] scanbot::Error),
}
