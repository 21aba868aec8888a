#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use crate::error::Error;
pub use crate::error::Result;
pub use crate::new::create_new_project;
pub use crate::new::create_post;
pub use crate::new::NewPost;
pub use crate::plume::build;
pub use crate::template::Liquid;
pub use crate::template::TemplateEngine;
pub use crate::template::TemplateKind;
pub use plume_config::Config;

pub mod assets;
pub mod document;
pub mod error;
pub mod feed;
pub mod listing;
pub mod mark;
pub mod output;
pub mod sitemap;
pub mod slug;
pub mod template;

mod new;
mod plume;
