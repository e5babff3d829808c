use pluton_types::{DamageType, HitInfo, Initiator, PlayerId, Realm, UserGroup, Vec3};

#[test]
fn fallback_hit_has_no_damage_and_self_initiator() {
    let victim = PlayerId::new(5);
    let info = HitInfo::fallback(DamageType::Cold, Initiator::Player(victim));

    assert_eq!(info.damage_amount, 0.0);
    assert_eq!(info.damage_type, DamageType::Cold);
    assert_eq!(info.initiator, Some(Initiator::Player(victim)));
    assert_eq!(info.resource_gather_proficiency, 1.0);
}

#[test]
fn gather_damage_scales_with_proficiency() {
    let info = HitInfo::new(20.0, DamageType::Slash).with_gather_proficiency(0.5);
    assert_eq!(info.gather_damage(), 10.0);
}

#[test]
fn hit_info_missing_fields_take_defaults() {
    let info: HitInfo =
        serde_json::from_str(r#"{"damage_amount": 3.0, "damage_type": "blunt_trauma"}"#).unwrap();
    assert_eq!(info.damage_type, DamageType::BluntTrauma);
    assert_eq!(info.initiator, None);
    assert_eq!(info.point_start, Vec3::ZERO);
    assert_eq!(info.resource_gather_proficiency, 1.0);
}

#[test]
fn vec3_distance() {
    let a = Vec3::new(0.0, 0.0, 0.0);
    let b = Vec3::new(3.0, 4.0, 0.0);
    assert_eq!(a.distance(b), 5.0);
    assert_eq!(b - a, b);
}

#[test]
fn user_group_auth_levels() {
    assert_eq!(UserGroup::None.auth_level(), 0);
    assert_eq!(UserGroup::Moderator.auth_level(), 1);
    assert_eq!(UserGroup::Owner.auth_level(), 2);
    assert_eq!(UserGroup::Banned.auth_level(), 0);
}

#[test]
fn user_group_parse_is_case_insensitive() {
    assert_eq!("Owner".parse::<UserGroup>().unwrap(), UserGroup::Owner);
    assert!("admin".parse::<UserGroup>().is_err());
}

#[test]
fn realm_defaults_to_server() {
    assert!(Realm::default().is_server());
    assert!(!Realm::Client.is_server());
}
