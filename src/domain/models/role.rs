use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Bot,
}

impl ToString for Role {
    fn to_string(&self) -> String {
        match self {
            Role::User => {
                let username = Config::get(ConfigKey::Username);
                if username.is_empty() {
                    return String::from("You");
                }
                return username;
            }
            Role::Bot => return String::from("Dr. AI"),
        }
    }
}
