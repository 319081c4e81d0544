/*
 * Responsibility
 * - Public middleware entry points
 * - auth::identify (who is calling) / http (cross-cutting transport concerns)
 */
pub mod auth;
pub mod http;
