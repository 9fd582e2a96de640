//! In-process store implementing every store trait.
//!
//! All tables sit behind one lock, so each operation (including the
//! booking check-and-insert) is atomic. Text filters match
//! case-insensitively, like `ILIKE`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use roomhub_core::config::booking::ConflictMode;
use roomhub_core::error::AppError;
use roomhub_core::result::AppResult;
use roomhub_core::types::{PageRequest, PageResponse, TimeRange};
use roomhub_entity::access::{Permission, Role, RoleWithPermissions};
use roomhub_entity::booking::{Booking, BookingDetail, BookingQuery, BookingStatus, NewBooking};
use roomhub_entity::meeting_room::{CreateMeetingRoom, MeetingRoom, MeetingRoomQuery};
use roomhub_entity::statistic::{RoomUsageCount, UserBookingCount};
use roomhub_entity::user::{CreateUser, UpdateProfile, User, UserDetail, UserQuery};

use crate::store::{
    BookingOutcome, BookingStore, MeetingRoomStore, RoleStore, StatisticStore, UserStore,
};

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, User>,
    roles: BTreeMap<i64, Role>,
    permissions: BTreeMap<i64, Permission>,
    user_roles: Vec<(i64, i64)>,
    role_permissions: Vec<(i64, i64)>,
    rooms: BTreeMap<i64, MeetingRoom>,
    bookings: BTreeMap<i64, Booking>,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory relational store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(n) if !n.is_empty() => haystack.to_lowercase().contains(&n.to_lowercase()),
        _ => true,
    }
}

fn paginate<T>(items: Vec<T>, page: &PageRequest) -> PageResponse<T> {
    let total = items.len() as u64;
    let items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    PageResponse::new(items, total)
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_account(&self, username: &str, is_admin: bool) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username && u.is_admin == is_admin)
            .cloned())
    }

    async fn find_account_by_id(&self, id: i64, is_admin: bool) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).filter(|u| u.is_admin == is_admin).cloned())
    }

    async fn find_first_admin(&self) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.is_admin).cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == data.username) {
            return Err(AppError::conflict("username already exists"));
        }
        let now = Utc::now();
        let user = User {
            id: tables.allocate_id(),
            username: data.username.clone(),
            password_hash: data.password_hash.clone(),
            nick_name: data.nick_name.clone(),
            email: data.email.clone(),
            head_pic: None,
            phone_number: None,
            is_frozen: false,
            is_admin: data.is_admin,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.users.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn update_profile(&self, data: &UpdateProfile) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.get_mut(&data.id) else {
            return Ok(false);
        };
        if let Some(nick_name) = &data.nick_name {
            user.nick_name = nick_name.clone();
        }
        if let Some(head_pic) = &data.head_pic {
            user.head_pic = Some(head_pic.clone());
        }
        user.updated_at = Utc::now();
        Ok(true)
    }

    async fn set_frozen(&self, id: i64, frozen: bool) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.users.get_mut(&id) {
            Some(user) => {
                user.is_frozen = frozen;
                user.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn search(&self, query: &UserQuery) -> AppResult<PageResponse<User>> {
        let tables = self.tables.read().await;
        let found: Vec<User> = tables
            .users
            .values()
            .filter(|u| {
                matches(&u.username, query.username.as_deref())
                    && matches(&u.nick_name, query.nick_name.as_deref())
                    && matches(&u.email, query.email.as_deref())
            })
            .cloned()
            .collect();
        Ok(paginate(found, &query.page))
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn roles_with_permissions(&self, user_id: i64) -> AppResult<Vec<RoleWithPermissions>> {
        let tables = self.tables.read().await;
        let grants = tables
            .user_roles
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, role_id)| tables.roles.get(role_id))
            .map(|role| RoleWithPermissions {
                role: role.clone(),
                permissions: tables
                    .role_permissions
                    .iter()
                    .filter(|(rid, _)| *rid == role.id)
                    .filter_map(|(_, pid)| tables.permissions.get(pid).cloned())
                    .collect(),
            })
            .collect();
        Ok(grants)
    }

    async fn ensure_role(&self, name: &str, permission_codes: &[String]) -> AppResult<Role> {
        let mut tables = self.tables.write().await;
        let role = match tables.roles.values().find(|r| r.name == name).cloned() {
            Some(role) => role,
            None => {
                let role = Role {
                    id: tables.allocate_id(),
                    name: name.to_string(),
                };
                tables.roles.insert(role.id, role.clone());
                role
            }
        };

        for code in permission_codes {
            let permission_id = match tables.permissions.values().find(|p| &p.code == code) {
                Some(p) => p.id,
                None => {
                    let permission = Permission {
                        id: tables.allocate_id(),
                        code: code.clone(),
                        description: code.clone(),
                    };
                    let id = permission.id;
                    tables.permissions.insert(id, permission);
                    id
                }
            };
            if !tables.role_permissions.contains(&(role.id, permission_id)) {
                tables.role_permissions.push((role.id, permission_id));
            }
        }
        Ok(role)
    }

    async fn assign_role(&self, user_id: i64, role_id: i64) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.user_roles.contains(&(user_id, role_id)) {
            tables.user_roles.push((user_id, role_id));
        }
        Ok(())
    }
}

#[async_trait]
impl MeetingRoomStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<MeetingRoom>> {
        Ok(self.tables.read().await.rooms.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<MeetingRoom>> {
        let tables = self.tables.read().await;
        Ok(tables.rooms.values().find(|r| r.name == name).cloned())
    }

    async fn create(&self, data: &CreateMeetingRoom) -> AppResult<MeetingRoom> {
        let mut tables = self.tables.write().await;
        if tables.rooms.values().any(|r| r.name == data.name) {
            return Err(AppError::conflict("meeting room name already exists"));
        }
        let now = Utc::now();
        let room = MeetingRoom {
            id: tables.allocate_id(),
            name: data.name.clone(),
            capacity: data.capacity,
            location: data.location.clone(),
            equipment: data.equipment.clone(),
            description: data.description.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn update(&self, room: &MeetingRoom) -> AppResult<MeetingRoom> {
        let mut tables = self.tables.write().await;
        if tables
            .rooms
            .values()
            .any(|r| r.id != room.id && r.name == room.name)
        {
            return Err(AppError::conflict("meeting room name already exists"));
        }
        let Some(stored) = tables.rooms.get_mut(&room.id) else {
            return Err(AppError::validation("meeting room does not exist"));
        };
        *stored = room.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.rooms.remove(&id).is_some();
        if removed {
            tables.bookings.retain(|_, b| b.room_id != id);
        }
        Ok(removed)
    }

    async fn search(&self, query: &MeetingRoomQuery) -> AppResult<PageResponse<MeetingRoom>> {
        let tables = self.tables.read().await;
        let found: Vec<MeetingRoom> = tables
            .rooms
            .values()
            .filter(|r| {
                matches(&r.name, query.name.as_deref())
                    && query.capacity.is_none_or(|c| r.capacity == c)
                    && matches(&r.equipment, query.equipment.as_deref())
            })
            .cloned()
            .collect();
        Ok(paginate(found, &query.page))
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Booking>> {
        Ok(self.tables.read().await.bookings.get(&id).cloned())
    }

    async fn create_if_available(
        &self,
        data: &NewBooking,
        mode: ConflictMode,
    ) -> AppResult<BookingOutcome> {
        let mut tables = self.tables.write().await;
        if !tables.rooms.contains_key(&data.room_id) {
            return Ok(BookingOutcome::RoomNotFound);
        }
        let conflicting = tables
            .bookings
            .values()
            .any(|b| b.room_id == data.room_id && b.blocks(data.start_time, data.end_time, mode));
        if conflicting {
            return Ok(BookingOutcome::Conflict);
        }

        let now = Utc::now();
        let booking = Booking {
            id: tables.allocate_id(),
            user_id: data.user_id,
            room_id: data.room_id,
            start_time: data.start_time,
            end_time: data.end_time,
            status: BookingStatus::Pending,
            note: data.note.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.bookings.insert(booking.id, booking.clone());
        Ok(BookingOutcome::Created(booking))
    }

    async fn set_status(&self, id: i64, status: BookingStatus) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.bookings.get_mut(&id) {
            Some(booking) => {
                booking.status = status;
                booking.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn search(&self, query: &BookingQuery) -> AppResult<PageResponse<BookingDetail>> {
        let tables = self.tables.read().await;
        let found: Vec<BookingDetail> = tables
            .bookings
            .values()
            .filter_map(|b| {
                let user = tables.users.get(&b.user_id)?;
                let room = tables.rooms.get(&b.room_id)?;
                Some((b, user, room))
            })
            .filter(|(b, user, room)| {
                matches(&user.username, query.username.as_deref())
                    && matches(&room.name, query.room_name.as_deref())
                    && matches(&room.location, query.room_location.as_deref())
                    && query.range.is_none_or(|r| r.contains(b.start_time))
            })
            .map(|(b, user, room)| BookingDetail {
                id: b.id,
                start_time: b.start_time,
                end_time: b.end_time,
                status: b.status,
                note: b.note.clone(),
                create_time: b.created_at,
                update_time: b.updated_at,
                user: UserDetail::from(user),
                room: room.clone(),
            })
            .collect();
        Ok(paginate(found, &query.page))
    }
}

#[async_trait]
impl StatisticStore for MemoryStore {
    async fn user_booking_counts(&self, range: &TimeRange) -> AppResult<Vec<UserBookingCount>> {
        let tables = self.tables.read().await;
        let mut counts: BTreeMap<i64, i64> = BTreeMap::new();
        for booking in tables.bookings.values().filter(|b| range.contains(b.start_time)) {
            *counts.entry(booking.user_id).or_default() += 1;
        }
        let mut rows: Vec<UserBookingCount> = counts
            .into_iter()
            .filter_map(|(user_id, booking_count)| {
                tables.users.get(&user_id).map(|u| UserBookingCount {
                    user_id,
                    username: u.username.clone(),
                    booking_count,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.booking_count.cmp(&a.booking_count).then(a.user_id.cmp(&b.user_id)));
        Ok(rows)
    }

    async fn room_usage_counts(&self, range: &TimeRange) -> AppResult<Vec<RoomUsageCount>> {
        let tables = self.tables.read().await;
        let mut counts: BTreeMap<i64, i64> = BTreeMap::new();
        for booking in tables.bookings.values().filter(|b| range.contains(b.start_time)) {
            *counts.entry(booking.room_id).or_default() += 1;
        }
        let mut rows: Vec<RoomUsageCount> = counts
            .into_iter()
            .filter_map(|(room_id, used_count)| {
                tables.rooms.get(&room_id).map(|r| RoomUsageCount {
                    meeting_room_id: room_id,
                    meeting_room_name: r.name.clone(),
                    used_count,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            b.used_count
                .cmp(&a.used_count)
                .then(a.meeting_room_id.cmp(&b.meeting_room_id))
        });
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn at(ms: i64) -> chrono::DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).expect("valid timestamp")
    }

    async fn seed(store: &MemoryStore) -> (User, MeetingRoom) {
        let user = UserStore::create(
            store,
            &CreateUser {
                username: "alice".into(),
                password_hash: "hash".into(),
                nick_name: "Alice".into(),
                email: "alice@example.com".into(),
                is_admin: false,
            },
        )
        .await
        .expect("create user");
        let room = MeetingRoomStore::create(
            store,
            &CreateMeetingRoom {
                name: "Aurora".into(),
                capacity: 8,
                location: "2F".into(),
                equipment: "projector".into(),
                description: String::new(),
            },
        )
        .await
        .expect("create room");
        (user, room)
    }

    fn new_booking(user: &User, room: &MeetingRoom, start: i64, end: i64) -> NewBooking {
        NewBooking {
            user_id: user.id,
            room_id: room.id,
            start_time: at(start),
            end_time: at(end),
            note: None,
        }
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let store = MemoryStore::new();
        seed(&store).await;
        let err = UserStore::create(
            &store,
            &CreateUser {
                username: "alice".into(),
                password_hash: "other".into(),
                nick_name: "Other".into(),
                email: "other@example.com".into(),
                is_admin: false,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, roomhub_core::error::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn admin_partition_is_separate() {
        let store = MemoryStore::new();
        let (user, _) = seed(&store).await;
        assert!(store.find_account("alice", false).await.expect("query").is_some());
        assert!(store.find_account("alice", true).await.expect("query").is_none());
        assert!(store.find_account_by_id(user.id, true).await.expect("query").is_none());
    }

    #[tokio::test]
    async fn booking_conflicts_and_release() {
        let store = MemoryStore::new();
        let (user, room) = seed(&store).await;

        let first = store
            .create_if_available(&new_booking(&user, &room, 1000, 5000), ConflictMode::Overlap)
            .await
            .expect("insert");
        let BookingOutcome::Created(first) = first else {
            panic!("expected created");
        };
        assert_eq!(first.status, BookingStatus::Pending);

        let nested = store
            .create_if_available(&new_booking(&user, &room, 2000, 3000), ConflictMode::Overlap)
            .await
            .expect("insert");
        assert_eq!(nested, BookingOutcome::Conflict);

        store
            .set_status(first.id, BookingStatus::Unbound)
            .await
            .expect("status");
        let retry = store
            .create_if_available(&new_booking(&user, &room, 2000, 3000), ConflictMode::Overlap)
            .await
            .expect("insert");
        assert!(matches!(retry, BookingOutcome::Created(_)));
    }

    #[tokio::test]
    async fn booking_unknown_room() {
        let store = MemoryStore::new();
        let (user, room) = seed(&store).await;
        let mut data = new_booking(&user, &room, 1000, 2000);
        data.room_id = room.id + 100;
        let outcome = store
            .create_if_available(&data, ConflictMode::Overlap)
            .await
            .expect("insert");
        assert_eq!(outcome, BookingOutcome::RoomNotFound);
    }

    #[tokio::test]
    async fn roles_keep_assignment_order() {
        let store = MemoryStore::new();
        let (user, _) = seed(&store).await;
        let editor = store
            .ensure_role("editor", &["ddd".into(), "ccc".into()])
            .await
            .expect("role");
        let viewer = store.ensure_role("viewer", &["ccc".into()]).await.expect("role");
        store.assign_role(user.id, viewer.id).await.expect("assign");
        store.assign_role(user.id, editor.id).await.expect("assign");
        store.assign_role(user.id, editor.id).await.expect("assign twice");

        let grants = store.roles_with_permissions(user.id).await.expect("grants");
        let names: Vec<&str> = grants.iter().map(|g| g.role.name.as_str()).collect();
        assert_eq!(names, vec!["viewer", "editor"]);
        let editor_codes: Vec<&str> = grants[1].permissions.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(editor_codes, vec!["ddd", "ccc"]);
        assert_eq!(grants[0].permissions[0].id, grants[1].permissions[1].id);
    }

    #[tokio::test]
    async fn search_paginates_and_counts() {
        let store = MemoryStore::new();
        let (user, room) = seed(&store).await;
        for i in 0..25 {
            let start = i * 10_000;
            store
                .create_if_available(
                    &new_booking(&user, &room, start, start + 5_000),
                    ConflictMode::Overlap,
                )
                .await
                .expect("insert");
        }
        let page = BookingStore::search(
            &store,
            &BookingQuery {
                page: PageRequest::from_params(Some(2), Some(10), 100).expect("page"),
                ..Default::default()
            },
        )
        .await
        .expect("search");
        assert_eq!(page.total_count, 25);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].start_time, at(100_000));
        assert_eq!(page.items[0].user.username, "alice");
    }

    #[tokio::test]
    async fn deleting_room_drops_its_bookings() {
        let store = MemoryStore::new();
        let (user, room) = seed(&store).await;
        store
            .create_if_available(&new_booking(&user, &room, 0, 1000), ConflictMode::Overlap)
            .await
            .expect("insert");
        assert!(MeetingRoomStore::delete(&store, room.id).await.expect("delete"));
        let range = TimeRange::new(at(0), at(10_000)).expect("range");
        assert!(store.room_usage_counts(&range).await.expect("stats").is_empty());
    }
}
