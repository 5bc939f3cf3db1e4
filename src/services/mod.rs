pub mod generator;
pub use generator::{CodeGenerator, RandomCodeGenerator};

pub mod token;
pub use token::{Claims, TokenError, TokenIssuer};

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginResult, UserInfo};
pub use auth_service_impl::SeaOrmAuthService;

pub mod gadget_service;
pub mod gadget_service_impl;
pub use gadget_service::{
    DecommissionResult, DecoratedGadget, GadgetDto, GadgetError, GadgetService, GadgetUpdate,
    SelfDestructResult,
};
pub use gadget_service_impl::SeaOrmGadgetService;
