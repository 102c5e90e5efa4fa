//! Remote method descriptors
//!
//! A static description of how each exposed operation maps onto a request:
//! verb, path, where each argument comes from and what the response looks
//! like. Transports read this table; the services never do.
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpVerb {
    Get,
    Post,
}

/// Where an argument is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamSource {
    Body,
    Query,
    Header,
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Object,
    String,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemoteParam {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub source: ParamSource,
    pub required: bool,
    pub description: &'static str,
}

/// Shape of a successful response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemoteReturns {
    /// Name of the returned value, if any
    pub name: Option<&'static str>,
    /// The value is the whole response body rather than a property of it
    pub root: bool,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemoteMethod {
    pub name: &'static str,
    pub verb: HttpVerb,
    pub path: &'static str,
    pub params: &'static [RemoteParam],
    pub returns: RemoteReturns,
    pub description: &'static str,
}

const ACCESS_TOKEN_HEADER: RemoteParam = RemoteParam {
    name: "access_token",
    param_type: ParamType::String,
    source: ParamSource::Header,
    required: true,
    description: "Access token of the current session",
};

pub static REMOTE_METHODS: &[RemoteMethod] = &[
    RemoteMethod {
        name: "login",
        verb: HttpVerb::Post,
        path: "/login",
        params: &[
            RemoteParam {
                name: "credentials",
                param_type: ParamType::Object,
                source: ParamSource::Body,
                required: true,
                description: "Username or email, password, optional realm and ttl",
            },
            RemoteParam {
                name: "include",
                param_type: ParamType::String,
                source: ParamSource::Query,
                required: false,
                description: "Related objects to include in the response; `user` attaches the account",
            },
        ],
        returns: RemoteReturns {
            name: Some("accessToken"),
            root: true,
            description: "The access token, with the account under `user` when requested",
        },
        description: "Log in with username/email and password",
    },
    RemoteMethod {
        name: "logout",
        verb: HttpVerb::Post,
        path: "/logout",
        params: &[ACCESS_TOKEN_HEADER],
        returns: RemoteReturns {
            name: None,
            root: false,
            description: "Empty response",
        },
        description: "Log out by destroying the presented access token",
    },
    RemoteMethod {
        name: "confirm",
        verb: HttpVerb::Get,
        path: "/confirm",
        params: &[
            RemoteParam {
                name: "uid",
                param_type: ParamType::String,
                source: ParamSource::Query,
                required: true,
                description: "Account id",
            },
            RemoteParam {
                name: "token",
                param_type: ParamType::String,
                source: ParamSource::Query,
                required: true,
                description: "Verification token",
            },
            RemoteParam {
                name: "redirect",
                param_type: ParamType::String,
                source: ParamSource::Query,
                required: false,
                description: "Where to send the client after a successful confirmation",
            },
        ],
        returns: RemoteReturns {
            name: None,
            root: false,
            description: "Empty response or a redirect",
        },
        description: "Confirm an account's email address",
    },
    RemoteMethod {
        name: "resetPassword",
        verb: HttpVerb::Post,
        path: "/reset",
        params: &[RemoteParam {
            name: "options",
            param_type: ParamType::Object,
            source: ParamSource::Body,
            required: true,
            description: "Email or username, and optional realm, of the account",
        }],
        returns: RemoteReturns {
            name: None,
            root: false,
            description: "Empty response, whether or not the account exists",
        },
        description: "Request a password reset token",
    },
    RemoteMethod {
        name: "changePassword",
        verb: HttpVerb::Post,
        path: "/change-password",
        params: &[
            ACCESS_TOKEN_HEADER,
            RemoteParam {
                name: "oldPassword",
                param_type: ParamType::String,
                source: ParamSource::Body,
                required: true,
                description: "Current password",
            },
            RemoteParam {
                name: "newPassword",
                param_type: ParamType::String,
                source: ParamSource::Body,
                required: true,
                description: "Replacement password",
            },
        ],
        returns: RemoteReturns {
            name: None,
            root: false,
            description: "Empty response",
        },
        description: "Change the password of the logged in account",
    },
];

/// Look up a remote method by operation name
pub fn remote_method(name: &str) -> Option<&'static RemoteMethod> {
    REMOTE_METHODS.iter().find(|method| method.name == name)
}
