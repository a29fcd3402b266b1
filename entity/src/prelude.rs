pub use super::achievement::Entity as Achievement;
pub use super::event::Entity as Event;
pub use super::event_participant::Entity as EventParticipant;
pub use super::notification::Entity as Notification;
pub use super::order::Entity as Order;
pub use super::order_item::Entity as OrderItem;
pub use super::product::Entity as Product;
pub use super::user::Entity as User;
pub use super::user_achievement::Entity as UserAchievement;
