/*!
 * Identity extractor
 *
 * Responsibility:
 * - Hand the identity attached by `middleware::auth::identify` to handlers
 * - Handlers never look at the Authorization header themselves
 */

mod core;

pub use self::core::IdentityExtractor;
