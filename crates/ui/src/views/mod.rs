mod bridge;
mod content;
mod course_card;
mod decoration;
mod loading;
mod portfolio;
mod scripts;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use bridge::IntersectionFeed;
pub use content::{ContentView, REPOSITORY_URL};
pub use loading::LoadingView;
pub use portfolio::PortfolioView;
pub use scripts::reveal_dom_id;
