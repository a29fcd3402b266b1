mod achievement;
mod event;
mod notification;
mod order;
mod participant;
mod product;
mod user;
