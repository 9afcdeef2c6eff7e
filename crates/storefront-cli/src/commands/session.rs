use anyhow::Result;
use serde_json::json;
use storefront_application::{RegistrationDetails, SessionStore};
use storefront_core::session::{Feature, SessionRecord};

pub fn status(store: &SessionStore) -> Result<()> {
    let report = json!({
        "state": store.state(),
        "identity": store.identity(),
        "loggedIn": store.is_logged_in(),
        "guest": store.is_guest(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub async fn login(
    store: &SessionStore,
    id: String,
    mobile: String,
    user_type: Option<String>,
    name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let record = SessionRecord {
        user_type,
        name,
        email,
        ..SessionRecord::new(id, mobile)
    };
    store.save(record).await?;
    println!("Logged in as {}", store.get_user_id().flatten().unwrap_or_default());
    Ok(())
}

pub async fn guest(store: &SessionStore) -> Result<()> {
    store.login_as_guest().await?;
    println!("Continuing as guest");
    Ok(())
}

pub async fn register(
    store: &SessionStore,
    name: String,
    email: Option<String>,
    city: Option<String>,
    location: Option<String>,
    secondary_mobile: Option<String>,
) -> Result<()> {
    let details = RegistrationDetails {
        name: Some(name),
        email,
        secondary_mobile,
        city,
        location,
    };
    let record = store.complete_registration(details).await?;
    println!("Registration complete for {}", record.id);
    Ok(())
}

pub async fn logout(store: &SessionStore) -> Result<()> {
    store.clear().await?;
    println!("Logged out");
    Ok(())
}

pub fn gate(store: &SessionStore, feature: Feature) -> Result<()> {
    let report = json!({
        "feature": feature,
        "access": store.access(feature),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
