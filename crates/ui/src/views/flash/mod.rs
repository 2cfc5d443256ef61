mod scripts;
mod view;

pub use view::FlashView;
#[cfg(test)]
pub(crate) use view::FlashTestHandles;
