//! Model assembly from PMZ archives.

mod info;
mod pmz;
mod view;
