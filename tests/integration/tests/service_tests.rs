//! Service-level tests
//!
//! Drive the authorization core against the in-memory store. These need no
//! external services.
//!
//! Run with: cargo test -p integration-tests --test service_tests

use futures::future::join_all;
use hearth_core::{ChannelType, InviteCode, MemberRole, GENERAL_CHANNEL_NAME};
use hearth_service::{
    ChannelService, ConversationService, CreateChannelRequest, IdentityService, InviteOutcome,
    InviteService, MemberService, ServerService, ServiceError, SetupResponse,
    UpdateChannelRequest, UpdateServerRequest,
};
use integration_tests::{unique_identity, TestContext};

fn channel(name: &str) -> CreateChannelRequest {
    CreateChannelRequest {
        name: name.to_string(),
        channel_type: ChannelType::Text,
    }
}

fn rename(name: &str) -> UpdateChannelRequest {
    UpdateChannelRequest {
        name: name.to_string(),
        channel_type: ChannelType::Text,
    }
}

fn assert_code<T: std::fmt::Debug>(result: Result<T, ServiceError>, code: &str) {
    match result {
        Ok(value) => panic!("expected {code}, got Ok({value:?})"),
        Err(err) => assert_eq!(err.error_code(), code, "unexpected error: {err}"),
    }
}

// ============================================================================
// Identity
// ============================================================================

#[tokio::test]
async fn test_missing_identity_is_unauthenticated() {
    let t = TestContext::new().unwrap();
    let result = IdentityService::new(&t.ctx).resolve_profile(None).await;
    assert!(matches!(result, Err(ServiceError::Unauthenticated)));
}

#[tokio::test]
async fn test_profile_is_provisioned_once() {
    let t = TestContext::new().unwrap();
    let identity = unique_identity("Alice");
    let identities = IdentityService::new(&t.ctx);

    let (first, second) = futures::join!(
        identities.resolve_profile(Some(&identity)),
        identities.resolve_profile(Some(&identity)),
    );

    assert_eq!(first.unwrap().id, second.unwrap().id);
    assert_eq!(t.store.profile_count(), 1);
}

// ============================================================================
// Servers
// ============================================================================

#[tokio::test]
async fn test_create_server_seeds_general_and_admin() {
    let t = TestContext::new().unwrap();
    let p1 = t.profile("P1").await.unwrap();

    let server = t.server(&p1, "Test").await.unwrap();

    assert_eq!(server.name, "Test");
    assert_eq!(server.profile_id, p1.id);

    let channels = t.store.channels_of(server.id);
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0].name, GENERAL_CHANNEL_NAME);
    assert_eq!(channels[0].channel_type, ChannelType::Text);

    let members = t.store.members_of(server.id);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].profile_id, p1.id);
    assert_eq!(members[0].role, MemberRole::Admin);
}

#[tokio::test]
async fn test_only_owner_manages_server() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let server = t.server(&owner, "Owned").await.unwrap();

    let admin = t.profile("Admin").await.unwrap();
    let moderator = t.profile("Moderator").await.unwrap();
    let guest = t.profile("Guest").await.unwrap();
    let outsider = t.profile("Outsider").await.unwrap();
    t.join_as(&owner, &admin, &server, MemberRole::Admin).await.unwrap();
    t.join_as(&owner, &moderator, &server, MemberRole::Moderator).await.unwrap();
    t.join(&guest, &server).await.unwrap();

    let servers = ServerService::new(&t.ctx);
    for caller in [&admin, &moderator, &guest, &outsider] {
        let update = UpdateServerRequest {
            name: "Taken".to_string(),
            image_url: "https://example.com/x.png".to_string(),
        };
        assert_code(servers.update_server(caller.id, server.id, update).await, "NOT_SERVER_OWNER");
        assert_code(servers.rotate_invite_code(caller.id, server.id).await, "NOT_SERVER_OWNER");
        assert_code(servers.delete_server(caller.id, server.id).await, "NOT_SERVER_OWNER");
    }

    let stored = servers.get_server(owner.id, server.id).await.unwrap();
    assert_eq!(stored.server.name, "Owned");
    assert_eq!(stored.server.invite_code, server.invite_code);
}

#[tokio::test]
async fn test_owner_updates_server() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let server = t.server(&owner, "Before").await.unwrap();

    let update = UpdateServerRequest {
        name: "  After  ".to_string(),
        image_url: "https://example.com/after.png".to_string(),
    };
    let updated = ServerService::new(&t.ctx)
        .update_server(owner.id, server.id, update)
        .await
        .unwrap();

    assert_eq!(updated.name, "After");
    assert_eq!(updated.image_url, "https://example.com/after.png");
}

#[tokio::test]
async fn test_rotate_invite_code_retires_old_code() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("P1").await.unwrap();
    let server = t.server(&owner, "Test").await.unwrap();
    let servers = ServerService::new(&t.ctx);

    let first = servers.rotate_invite_code(owner.id, server.id).await.unwrap();
    let second = servers.rotate_invite_code(owner.id, server.id).await.unwrap();

    assert_ne!(first.invite_code, server.invite_code);
    assert_ne!(second.invite_code, first.invite_code);

    let invites = InviteService::new(&t.ctx);
    let old = invites.existing_server(owner.id, &first.invite_code).await.unwrap();
    assert!(old.is_none());
    let current = invites.existing_server(owner.id, &second.invite_code).await.unwrap();
    assert_eq!(current.map(|s| s.id), Some(server.id));
}

#[tokio::test]
async fn test_rotate_missing_server_not_found() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("P1").await.unwrap();
    let server = t.server(&owner, "Gone").await.unwrap();
    let servers = ServerService::new(&t.ctx);

    servers.delete_server(owner.id, server.id).await.unwrap();

    assert_code(servers.rotate_invite_code(owner.id, server.id).await, "UNKNOWN_SERVER");
}

#[tokio::test]
async fn test_delete_server_cascades() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let guest = t.profile("Guest").await.unwrap();
    let server = t.server(&owner, "Doomed").await.unwrap();
    let guest_member = t.join(&guest, &server).await.unwrap();
    let owner_member = t.member(&owner, server.id).await.unwrap();
    ConversationService::new(&t.ctx)
        .get_or_create(owner.id, owner_member.id, guest_member.id)
        .await
        .unwrap();

    let deleted = ServerService::new(&t.ctx)
        .delete_server(owner.id, server.id)
        .await
        .unwrap();

    assert_eq!(deleted.id, server.id);
    assert_eq!(t.store.server_count(), 0);
    assert!(t.store.members_of(server.id).is_empty());
    assert!(t.store.channels_of(server.id).is_empty());
    assert!(t.store.conversations().is_empty());
}

#[tokio::test]
async fn test_server_detail_hidden_from_non_members() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let outsider = t.profile("Outsider").await.unwrap();
    let server = t.server(&owner, "Private").await.unwrap();

    assert_code(
        ServerService::new(&t.ctx).get_server(outsider.id, server.id).await,
        "UNKNOWN_SERVER",
    );
}

#[tokio::test]
async fn test_setup_redirects_once_a_server_exists() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let servers = ServerService::new(&t.ctx);

    let before = servers.find_first_server(owner.id).await.unwrap();
    assert_eq!(before, SetupResponse::CreateFirstServer);

    let server = t.server(&owner, "First").await.unwrap();
    let after = servers.find_first_server(owner.id).await.unwrap();
    assert_eq!(after, SetupResponse::Redirect { server_id: server.id });

    let listed = servers.list_servers(owner.id).await.unwrap();
    assert_eq!(listed.len(), 1);
}

// ============================================================================
// Members
// ============================================================================

#[tokio::test]
async fn test_role_change_and_kick_never_target_self() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let admin = t.profile("Admin").await.unwrap();
    let guest = t.profile("Guest").await.unwrap();
    let server = t.server(&owner, "Selfless").await.unwrap();
    t.join_as(&owner, &admin, &server, MemberRole::Admin).await.unwrap();
    t.join(&guest, &server).await.unwrap();

    let members = MemberService::new(&t.ctx);
    let owner_member = t.member(&owner, server.id).await.unwrap();
    assert_code(
        members.change_role(owner.id, server.id, owner_member.id, MemberRole::Guest).await,
        "CANNOT_TARGET_SELF",
    );
    assert_code(
        members.kick_member(owner.id, server.id, owner_member.id).await,
        "CANNOT_TARGET_SELF",
    );

    for profile in [&admin, &guest] {
        let own = t.member(profile, server.id).await.unwrap();
        assert_code(
            members.change_role(profile.id, server.id, own.id, MemberRole::Admin).await,
            "NOT_SERVER_OWNER",
        );
        assert_code(members.kick_member(profile.id, server.id, own.id).await, "NOT_SERVER_OWNER");
    }

    assert_eq!(t.store.members_of(server.id).len(), 3);
    let owner_after = t.member(&owner, server.id).await.unwrap();
    assert_eq!(owner_after.role, MemberRole::Admin);
}

#[tokio::test]
async fn test_guest_cannot_kick() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("P1").await.unwrap();
    let p2 = t.profile("P2").await.unwrap();
    let p3 = t.profile("P3").await.unwrap();
    let server = t.server(&owner, "Test").await.unwrap();
    t.join(&p2, &server).await.unwrap();
    let target = t.join(&p3, &server).await.unwrap();

    let result = MemberService::new(&t.ctx)
        .kick_member(p2.id, server.id, target.id)
        .await;

    let err = result.unwrap_err();
    assert!(err.is_forbidden());
    assert_eq!(t.store.members_of(server.id).len(), 3);
}

#[tokio::test]
async fn test_admin_role_does_not_grant_ownership() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let admin = t.profile("Admin").await.unwrap();
    let guest = t.profile("Guest").await.unwrap();
    let server = t.server(&owner, "Split").await.unwrap();
    t.join_as(&owner, &admin, &server, MemberRole::Admin).await.unwrap();
    let target = t.join(&guest, &server).await.unwrap();

    let members = MemberService::new(&t.ctx);
    assert_code(
        members.change_role(admin.id, server.id, target.id, MemberRole::Moderator).await,
        "NOT_SERVER_OWNER",
    );
    assert_code(members.kick_member(admin.id, server.id, target.id).await, "NOT_SERVER_OWNER");

    // Owner may still act on another ADMIN
    let admin_member = t.member(&admin, server.id).await.unwrap();
    let detail = members
        .kick_member(owner.id, server.id, admin_member.id)
        .await
        .unwrap();
    assert_eq!(detail.members.len(), 2);
}

#[tokio::test]
async fn test_owner_changes_role_and_kicks() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let guest = t.profile("Guest").await.unwrap();
    let server = t.server(&owner, "Roles").await.unwrap();
    let target = t.join(&guest, &server).await.unwrap();
    let members = MemberService::new(&t.ctx);

    let detail = members
        .change_role(owner.id, server.id, target.id, MemberRole::Moderator)
        .await
        .unwrap();
    let promoted = detail.members.iter().find(|m| m.id == target.id).unwrap();
    assert_eq!(promoted.role, MemberRole::Moderator);
    assert_eq!(detail.members[0].role, MemberRole::Admin);

    let detail = members.kick_member(owner.id, server.id, target.id).await.unwrap();
    assert!(detail.members.iter().all(|m| m.id != target.id));

    assert_code(
        members.kick_member(owner.id, server.id, target.id).await,
        "UNKNOWN_MEMBER",
    );
}

#[tokio::test]
async fn test_owner_cannot_leave() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let server = t.server(&owner, "Anchored").await.unwrap();

    assert_code(
        MemberService::new(&t.ctx).leave_server(owner.id, server.id).await,
        "OWNER_CANNOT_LEAVE",
    );
    assert_eq!(t.store.members_of(server.id).len(), 1);
}

#[tokio::test]
async fn test_member_leaves_server() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let guest = t.profile("Guest").await.unwrap();
    let server = t.server(&owner, "Revolving").await.unwrap();
    t.join(&guest, &server).await.unwrap();
    let members = MemberService::new(&t.ctx);

    let left = members.leave_server(guest.id, server.id).await.unwrap();
    assert_eq!(left.id, server.id);
    assert_eq!(left.name, "Revolving");
    assert_eq!(left.invite_code, server.invite_code.as_str());
    assert!(members.current_member(guest.id, server.id).await.unwrap().is_none());

    assert_code(members.leave_server(guest.id, server.id).await, "UNKNOWN_MEMBER");
}

#[tokio::test]
async fn test_current_member() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let outsider = t.profile("Outsider").await.unwrap();
    let server = t.server(&owner, "Mine").await.unwrap();
    let members = MemberService::new(&t.ctx);

    let own = members.current_member(owner.id, server.id).await.unwrap().unwrap();
    assert_eq!(own.profile_id, owner.id);
    assert_eq!(own.role, MemberRole::Admin);
    let profile = own.profile.expect("current member carries its profile");
    assert_eq!(profile.id, owner.id);
    assert_eq!(profile.name, owner.name);

    assert!(members.current_member(outsider.id, server.id).await.unwrap().is_none());
}

// ============================================================================
// Channels
// ============================================================================

#[tokio::test]
async fn test_general_name_rejected_for_everyone() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("P1").await.unwrap();
    let p2 = t.profile("P2").await.unwrap();
    let server = t.server(&owner, "Test").await.unwrap();
    let channels = ChannelService::new(&t.ctx);

    for caller in [&owner, &p2] {
        for name in ["general", " general "] {
            let result = channels.create_channel(caller.id, server.id, channel(name)).await;
            let err = result.unwrap_err();
            assert!(err.is_bad_request());
            assert_eq!(err.error_code(), "CHANNEL_NAME_RESERVED");
        }
    }

    assert_eq!(t.store.channels_of(server.id).len(), 1);
}

#[tokio::test]
async fn test_general_channel_is_immutable_for_every_role() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let moderator = t.profile("Moderator").await.unwrap();
    let guest = t.profile("Guest").await.unwrap();
    let server = t.server(&owner, "Steady").await.unwrap();
    t.join_as(&owner, &moderator, &server, MemberRole::Moderator).await.unwrap();
    t.join(&guest, &server).await.unwrap();

    let general = t.store.channels_of(server.id)[0].clone();
    let channels = ChannelService::new(&t.ctx);

    for caller in [&owner, &moderator, &guest] {
        assert_code(
            channels.edit_channel(caller.id, server.id, general.id, rename("lobby")).await,
            "GENERAL_CHANNEL_IMMUTABLE",
        );
        assert_code(
            channels.delete_channel(caller.id, server.id, general.id).await,
            "GENERAL_CHANNEL_IMMUTABLE",
        );
    }

    let after = t.store.channels_of(server.id);
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].name, GENERAL_CHANNEL_NAME);
}

#[tokio::test]
async fn test_channel_cannot_be_renamed_to_general() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let server = t.server(&owner, "Named").await.unwrap();
    let channels = ChannelService::new(&t.ctx);

    let detail = channels
        .create_channel(owner.id, server.id, channel("random"))
        .await
        .unwrap();
    let random = detail.channels.iter().find(|c| c.name == "random").unwrap();

    assert_code(
        channels.edit_channel(owner.id, server.id, random.id, rename("general")).await,
        "CHANNEL_NAME_RESERVED",
    );
}

#[tokio::test]
async fn test_channel_managers() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let moderator = t.profile("Moderator").await.unwrap();
    let guest = t.profile("Guest").await.unwrap();
    let outsider = t.profile("Outsider").await.unwrap();
    let server = t.server(&owner, "Channels").await.unwrap();
    t.join_as(&owner, &moderator, &server, MemberRole::Moderator).await.unwrap();
    t.join(&guest, &server).await.unwrap();
    let channels = ChannelService::new(&t.ctx);

    let detail = channels
        .create_channel(moderator.id, server.id, channel("voice"))
        .await
        .unwrap();
    let voice = detail.channels.iter().find(|c| c.name == "voice").unwrap().id;

    for caller in [&guest, &outsider] {
        let err = channels
            .create_channel(caller.id, server.id, channel("nope"))
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
        assert_code(
            channels.edit_channel(caller.id, server.id, voice, rename("nope")).await,
            "MISSING_PERMISSIONS",
        );
        assert_code(
            channels.delete_channel(caller.id, server.id, voice).await,
            "MISSING_PERMISSIONS",
        );
    }

    let edited = UpdateChannelRequest {
        name: "stage".to_string(),
        channel_type: ChannelType::Audio,
    };
    let detail = channels
        .edit_channel(owner.id, server.id, voice, edited)
        .await
        .unwrap();
    let stage = detail.channels.iter().find(|c| c.id == voice).unwrap();
    assert_eq!(stage.name, "stage");
    assert_eq!(stage.channel_type, ChannelType::Audio);

    let detail = channels.delete_channel(moderator.id, server.id, voice).await.unwrap();
    assert_eq!(detail.channels.len(), 1);

    assert_code(
        channels.delete_channel(moderator.id, server.id, voice).await,
        "UNKNOWN_CHANNEL",
    );
}

#[tokio::test]
async fn test_channel_from_other_server_not_found() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let first = t.server(&owner, "First").await.unwrap();
    let second = t.server(&owner, "Second").await.unwrap();
    let channels = ChannelService::new(&t.ctx);

    let detail = channels
        .create_channel(owner.id, second.id, channel("elsewhere"))
        .await
        .unwrap();
    let elsewhere = detail.channels.iter().find(|c| c.name == "elsewhere").unwrap().id;

    assert_code(
        channels.delete_channel(owner.id, first.id, elsewhere).await,
        "UNKNOWN_CHANNEL",
    );
    assert_eq!(t.store.channels_of(second.id).len(), 2);
}

// ============================================================================
// Invites
// ============================================================================

#[tokio::test]
async fn test_join_is_idempotent() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let guest = t.profile("Guest").await.unwrap();
    let server = t.server(&owner, "Open").await.unwrap();
    let invites = InviteService::new(&t.ctx);

    invites.join(guest.id, &server.invite_code).await.unwrap();
    invites.join(guest.id, &server.invite_code).await.unwrap();
    invites.join(owner.id, &server.invite_code).await.unwrap();

    let members = t.store.members_of(server.id);
    assert_eq!(members.len(), 2);
    let joined = members.iter().find(|m| m.profile_id == guest.id).unwrap();
    assert_eq!(joined.role, MemberRole::Guest);
}

#[tokio::test]
async fn test_concurrent_joins_create_one_member() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let guest = t.profile("Guest").await.unwrap();
    let server = t.server(&owner, "Busy").await.unwrap();
    let invites = InviteService::new(&t.ctx);

    let results = join_all((0..8).map(|_| invites.join(guest.id, &server.invite_code))).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(t.store.members_of(server.id).len(), 2);
}

#[tokio::test]
async fn test_join_errors() {
    let t = TestContext::new().unwrap();
    let guest = t.profile("Guest").await.unwrap();
    let invites = InviteService::new(&t.ctx);

    let malformed = invites.join(guest.id, "not-a-code").await.unwrap_err();
    assert!(malformed.is_bad_request());

    let unknown = InviteCode::generate();
    assert_code(invites.join(guest.id, unknown.as_str()).await, "UNKNOWN_INVITE");

    let existing = invites.existing_server(guest.id, "not-a-code").await.unwrap();
    assert!(existing.is_none());
}

#[tokio::test]
async fn test_invite_flow() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let server = t.server(&owner, "Flow").await.unwrap();
    let visitor = unique_identity("Visitor");
    let invites = InviteService::new(&t.ctx);

    let outcome = invites.resolve(None, Some(&server.invite_code)).await.unwrap();
    assert_eq!(outcome, InviteOutcome::SignInRequired);

    let outcome = invites.resolve(Some(&visitor), None).await.unwrap();
    assert_eq!(outcome, InviteOutcome::Home);

    let outcome = invites.resolve(Some(&visitor), Some("%%%")).await.unwrap();
    assert_eq!(outcome, InviteOutcome::Home);

    let unknown = InviteCode::generate();
    let outcome = invites.resolve(Some(&visitor), Some(unknown.as_str())).await.unwrap();
    assert_eq!(outcome, InviteOutcome::NotFound);
    assert_eq!(outcome.redirect(), None);

    let outcome = invites.resolve(Some(&visitor), Some(&server.invite_code)).await.unwrap();
    assert!(matches!(&outcome, InviteOutcome::Joined(s) if s.id == server.id));
    assert_eq!(outcome.redirect(), Some(format!("/servers/{}", server.id)));

    let outcome = invites.resolve(Some(&visitor), Some(&server.invite_code)).await.unwrap();
    assert!(matches!(&outcome, InviteOutcome::AlreadyMember(s) if s.id == server.id));

    assert_eq!(t.store.members_of(server.id).len(), 2);
}

// ============================================================================
// Conversations
// ============================================================================

#[tokio::test]
async fn test_conversation_is_symmetric() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let guest = t.profile("Guest").await.unwrap();
    let server = t.server(&owner, "Chatty").await.unwrap();
    let a = t.member(&owner, server.id).await.unwrap();
    let b = t.join(&guest, &server).await.unwrap();
    let conversations = ConversationService::new(&t.ctx);

    assert!(conversations.find_conversation(owner.id, a.id, b.id).await.unwrap().is_none());

    let created = conversations.get_or_create(guest.id, b.id, a.id).await.unwrap();
    assert_eq!(created.member_one_id, b.id);
    assert_eq!(created.member_one.profile.as_ref().map(|p| p.id), Some(guest.id));

    let ab = conversations.find_conversation(owner.id, a.id, b.id).await.unwrap().unwrap();
    let ba = conversations.find_conversation(owner.id, b.id, a.id).await.unwrap().unwrap();
    assert_eq!(ab.id, created.id);
    assert_eq!(ba.id, created.id);

    let again = conversations.get_or_create(owner.id, a.id, b.id).await.unwrap();
    assert_eq!(again.id, created.id);
    assert_eq!(t.store.conversations().len(), 1);
}

#[tokio::test]
async fn test_concurrent_conversations_create_one_row() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let guest = t.profile("Guest").await.unwrap();
    let server = t.server(&owner, "Racy").await.unwrap();
    let a = t.member(&owner, server.id).await.unwrap();
    let b = t.join(&guest, &server).await.unwrap();
    let conversations = ConversationService::new(&t.ctx);

    let calls = (0..8).map(|i| {
        let (one, two) = if i % 2 == 0 { (a.id, b.id) } else { (b.id, a.id) };
        conversations.get_or_create(owner.id, one, two)
    });
    let results = join_all(calls).await;

    let ids: Vec<_> = results.into_iter().map(|r| r.unwrap().id).collect();
    assert!(ids.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(t.store.conversations().len(), 1);
}

#[tokio::test]
async fn test_conversation_rules() {
    let t = TestContext::new().unwrap();
    let owner = t.profile("Owner").await.unwrap();
    let guest = t.profile("Guest").await.unwrap();
    let third = t.profile("Third").await.unwrap();
    let server = t.server(&owner, "Rules").await.unwrap();
    let other = t.server(&owner, "Other").await.unwrap();

    let a = t.member(&owner, server.id).await.unwrap();
    let b = t.join(&guest, &server).await.unwrap();
    let c = t.join(&third, &server).await.unwrap();
    let elsewhere = t.member(&owner, other.id).await.unwrap();
    let conversations = ConversationService::new(&t.ctx);

    assert_code(conversations.get_or_create(owner.id, a.id, a.id).await, "SELF_CONVERSATION");
    assert_code(
        conversations.get_or_create(owner.id, a.id, elsewhere.id).await,
        "CROSS_SERVER_CONVERSATION",
    );
    assert_code(conversations.find_conversation(third.id, a.id, b.id).await, "NOT_PARTICIPANT");

    MemberService::new(&t.ctx)
        .kick_member(owner.id, server.id, c.id)
        .await
        .unwrap();
    assert_code(conversations.get_or_create(owner.id, a.id, c.id).await, "UNKNOWN_MEMBER");

    assert!(t.store.conversations().is_empty());
}
