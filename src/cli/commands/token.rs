use crate::auth::{generate_jwt, Claims};
use crate::config;

pub fn handle(user_id: i32, name: String) -> anyhow::Result<()> {
    let config = config::config();
    let claims = Claims::new(name, user_id, config.security.jwt_expiry_hours);
    let token = generate_jwt(&claims, &config.security.jwt_secret)?;
    println!("{}", token);
    Ok(())
}
