pub mod book;
pub mod book_contributor;
pub mod contributor;
pub mod ids;
pub mod publisher;
pub mod review;
pub mod user;

pub use book::Book;
pub use book_contributor::{BookContributor, BookCredit, ContributionRole};
pub use contributor::Contributor;
pub use ids::{BookContributorId, BookId, ContributorId, PublisherId, ReviewId, UserId};
pub use publisher::Publisher;
pub use review::Review;
pub use user::User;
