//! Platform event translation.

mod winit;

pub(crate) use self::winit::{map_modifiers, translate_key_event};
