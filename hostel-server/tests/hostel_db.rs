//! Storage integration tests
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p hostel-server -- --ignored
//!
//! Every test creates its own rows with unique room numbers and phone
//! numbers, so the suite can run repeatedly against the same database.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use hostel_server::db::{
    provision, BookingRepo, DbError, GuestRepo, MaintenanceRepo, PaymentRepo, RoomRepo,
};
use hostel_server::models::{
    BookingCreate, BookingStatus, Guest, GuestCreate, MaintenanceRequestCreate,
    MaintenanceStatus, MaintenanceUpdate, PaymentCreate, PaymentMethod, Room, RoomCreate,
    RoomStatus, ValidationError,
};
use hostel_server::DbConfig;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn unique_tag() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_owned()
}

async fn setup() -> PgPool {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let config = DbConfig::from_env().expect("valid database config");
    provision(&config).await.expect("provisioning failed")
}

async fn new_guest(pool: &PgPool) -> Guest {
    let tag = unique_tag();
    let guest = GuestCreate {
        full_name: format!("Guest {}", tag),
        phone_number: format!("9{}", &tag[..8]),
        email: Some(format!("{}@example.com", tag)),
        id_proof_type: Some("Passport".into()),
        id_proof_number: None,
        address: None,
    }
    .validate()
    .unwrap();

    GuestRepo::new(pool).create(guest).await.expect("guest insert")
}

async fn new_room(pool: &PgPool, status: RoomStatus) -> Room {
    let room = RoomCreate {
        room_number: format!("R{}", unique_tag()),
        room_type: "Double".into(),
        monthly_rent: Decimal::new(450000, 2),
        occupancy_status: status,
    }
    .validate()
    .unwrap();

    RoomRepo::new(pool).create(room).await.expect("room insert")
}

/// Payments stored against one booking id. Scoped so that tests running
/// in parallel do not disturb each other's counts.
async fn payment_count(pool: &PgPool, booking_id: i64) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM payments WHERE booking_id = $1")
        .bind(booking_id)
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

fn booking_for(guest: &Guest, room: &Room) -> BookingCreate {
    BookingCreate {
        guest_id: guest.guest_id,
        room_id: room.room_id,
        check_in_date: date(2024, 1, 1),
        check_out_date: None,
        booking_status: BookingStatus::Active,
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn provisioning_is_idempotent() {
    let pool = setup().await;
    let config = DbConfig::from_env().unwrap();
    provision(&config).await.expect("second provisioning failed");

    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name::text FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_name IN ('guests', 'rooms', 'bookings', 'payments', 'users', 'maintenance_requests')",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(tables.len(), 6);
}

#[tokio::test]
#[ignore = "requires database"]
async fn guest_round_trip() {
    let pool = setup().await;
    let guest = new_guest(&pool).await;

    assert!(guest.guest_id > 0);
    assert_eq!(guest.id_proof_type.as_deref(), Some("Passport"));
    assert_eq!(guest.address, None);

    let fetched = GuestRepo::new(&pool).get(guest.guest_id).await.unwrap();
    assert_eq!(fetched.phone_number, guest.phone_number);

    let all = GuestRepo::new(&pool).list().await.unwrap();
    assert!(all.iter().any(|g| g.guest_id == guest.guest_id));
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_phone_rejected() {
    let pool = setup().await;
    let guest = new_guest(&pool).await;

    let again = GuestCreate {
        full_name: "Someone Else".into(),
        phone_number: guest.phone_number.clone(),
        email: None,
        id_proof_type: None,
        id_proof_number: None,
        address: None,
    }
    .validate()
    .unwrap();

    let err = GuestRepo::new(&pool).create(again).await.unwrap_err();
    assert!(matches!(err, DbError::Duplicate { .. }), "got {:?}", err);
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_room_number_rejected() {
    let pool = setup().await;
    let room = new_room(&pool, RoomStatus::Available).await;

    let again = RoomCreate {
        room_number: room.room_number.clone(),
        room_type: "Single".into(),
        monthly_rent: Decimal::new(100, 0),
        occupancy_status: RoomStatus::Available,
    }
    .validate()
    .unwrap();

    let err = RoomRepo::new(&pool).create(again).await.unwrap_err();
    assert!(matches!(err, DbError::Duplicate { .. }), "got {:?}", err);

    let unchanged = RoomRepo::new(&pool).get(room.room_id).await.unwrap();
    assert_eq!(unchanged, room);
}

#[tokio::test]
#[ignore = "requires database"]
async fn rent_keeps_two_decimals() {
    let pool = setup().await;
    let room = new_room(&pool, RoomStatus::Available).await;

    assert_eq!(room.monthly_rent.to_string(), "4500.00");
    assert_eq!(room.occupancy_status, RoomStatus::Available);
}

#[tokio::test]
#[ignore = "requires database"]
async fn booking_occupies_room() {
    let pool = setup().await;
    let guest = new_guest(&pool).await;
    let room = new_room(&pool, RoomStatus::Available).await;

    let booking = BookingRepo::new(&pool)
        .create(booking_for(&guest, &room).validate().unwrap())
        .await
        .expect("booking failed");

    assert_eq!(booking.room_id, room.room_id);
    assert_eq!(booking.booking_status, BookingStatus::Active);

    let room = RoomRepo::new(&pool).get(room.room_id).await.unwrap();
    assert_eq!(room.occupancy_status, RoomStatus::Occupied);

    let history = BookingRepo::new(&pool)
        .list_for_room(room.room_id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn booking_unavailable_room_conflicts() {
    let pool = setup().await;
    let guest = new_guest(&pool).await;
    let room = new_room(&pool, RoomStatus::Maintenance).await;

    let err = BookingRepo::new(&pool)
        .create(booking_for(&guest, &room).validate().unwrap())
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            DbError::RoomUnavailable {
                status: RoomStatus::Maintenance,
                ..
            }
        ),
        "got {:?}",
        err
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn booking_unknown_room_or_guest() {
    let pool = setup().await;
    let guest = new_guest(&pool).await;
    let room = new_room(&pool, RoomStatus::Available).await;

    let mut missing_room = booking_for(&guest, &room);
    missing_room.room_id = i64::MAX;
    let err = BookingRepo::new(&pool)
        .create(missing_room.validate().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "room", .. }));

    let mut missing_guest = booking_for(&guest, &room);
    missing_guest.guest_id = i64::MAX;
    let err = BookingRepo::new(&pool)
        .create(missing_guest.validate().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "guest", .. }));

    // Failed attempts leave the room untouched
    let room = RoomRepo::new(&pool).get(room.room_id).await.unwrap();
    assert_eq!(room.occupancy_status, RoomStatus::Available);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires database"]
async fn concurrent_bookings_single_winner() {
    let pool = setup().await;
    let room = new_room(&pool, RoomStatus::Available).await;

    let mut handles = Vec::new();
    for _ in 0..4 {
        let guest = new_guest(&pool).await;
        let booking = booking_for(&guest, &room).validate().unwrap();
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            BookingRepo::new(&pool).create(booking).await
        }));
    }

    let mut wins = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(_) => wins += 1,
            Err(DbError::RoomUnavailable { .. }) => conflicts += 1,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    assert_eq!(wins, 1);
    assert_eq!(conflicts, 3);

    let room = RoomRepo::new(&pool).get(room.room_id).await.unwrap();
    assert_eq!(room.occupancy_status, RoomStatus::Occupied);

    let history = BookingRepo::new(&pool)
        .list_for_room(room.room_id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].booking_status, BookingStatus::Active);
}

#[tokio::test]
#[ignore = "requires database"]
async fn payments_listed_newest_first() {
    let pool = setup().await;
    let guest = new_guest(&pool).await;
    let room = new_room(&pool, RoomStatus::Available).await;
    let booking = BookingRepo::new(&pool)
        .create(booking_for(&guest, &room).validate().unwrap())
        .await
        .unwrap();

    let repo = PaymentRepo::new(&pool);
    for (day, method) in [(1, PaymentMethod::Cash), (15, PaymentMethod::Upi)] {
        let payment = PaymentCreate {
            booking_id: booking.booking_id,
            amount_paid: Decimal::new(225000, 2),
            payment_date: date(2024, 2, day),
            payment_method: method,
            remarks: None,
        }
        .validate()
        .unwrap();
        repo.create(payment).await.expect("payment insert");
    }

    let ours: Vec<_> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|p| p.booking_id == booking.booking_id)
        .collect();

    assert_eq!(ours.len(), 2);
    assert_eq!(ours[0].payment_date, date(2024, 2, 15));
    assert_eq!(ours[0].payment_method, PaymentMethod::Upi);
    assert_eq!(ours[1].payment_date, date(2024, 2, 1));
}

#[tokio::test]
#[ignore = "requires database"]
async fn payment_for_unknown_booking() {
    let pool = setup().await;
    let payment = PaymentCreate {
        booking_id: i64::MAX,
        amount_paid: Decimal::new(100, 0),
        payment_date: date(2024, 2, 1),
        payment_method: PaymentMethod::Card,
        remarks: Some("deposit".into()),
    }
    .validate()
    .unwrap();

    let before = payment_count(&pool, i64::MAX).await;
    let err = PaymentRepo::new(&pool).create(payment).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "booking", .. }));
    assert_eq!(payment_count(&pool, i64::MAX).await, before);
    assert_eq!(before, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn maintenance_lifecycle() {
    let pool = setup().await;
    let room = new_room(&pool, RoomStatus::Available).await;
    let today = date(2024, 3, 10);

    let request = MaintenanceRequestCreate {
        room_id: room.room_id,
        guest_id: None,
        issue_description: "Leaking tap".into(),
        reported_date: Some(date(2024, 3, 5)),
        status: MaintenanceStatus::Pending,
        resolved_date: None,
    }
    .validate(today)
    .unwrap();

    let repo = MaintenanceRepo::new(&pool);
    let created = repo.create(request).await.expect("maintenance insert");
    assert_eq!(created.status, MaintenanceStatus::Pending);
    assert_eq!(created.guest_id, None);

    let in_progress = MaintenanceUpdate {
        status: Some(MaintenanceStatus::InProgress),
        resolved_date: None,
    }
    .validate(today)
    .unwrap();
    let updated = repo
        .update_status(created.request_id, in_progress)
        .await
        .unwrap();
    assert_eq!(updated.status, MaintenanceStatus::InProgress);
    assert_eq!(updated.resolved_date, None);

    let resolved = MaintenanceUpdate {
        status: Some(MaintenanceStatus::Resolved),
        resolved_date: None,
    }
    .validate(today)
    .unwrap();
    let updated = repo
        .update_status(created.request_id, resolved)
        .await
        .unwrap();
    assert_eq!(updated.status, MaintenanceStatus::Resolved);
    assert_eq!(updated.resolved_date, Some(today));

    // Reopening clears the resolution date
    let reopened = MaintenanceUpdate {
        status: Some(MaintenanceStatus::Pending),
        resolved_date: None,
    }
    .validate(today)
    .unwrap();
    let updated = repo
        .update_status(created.request_id, reopened)
        .await
        .unwrap();
    assert_eq!(updated.resolved_date, None);
}

#[tokio::test]
#[ignore = "requires database"]
async fn maintenance_resolved_before_reported() {
    let pool = setup().await;
    let room = new_room(&pool, RoomStatus::Available).await;
    let today = date(2024, 3, 10);

    let request = MaintenanceRequestCreate {
        room_id: room.room_id,
        guest_id: None,
        issue_description: "Broken window".into(),
        reported_date: Some(date(2024, 3, 5)),
        status: MaintenanceStatus::Pending,
        resolved_date: None,
    }
    .validate(today)
    .unwrap();

    let repo = MaintenanceRepo::new(&pool);
    let created = repo.create(request).await.unwrap();

    let too_early = MaintenanceUpdate {
        status: Some(MaintenanceStatus::Resolved),
        resolved_date: Some(date(2024, 3, 1)),
    }
    .validate(today)
    .unwrap();

    let err = repo
        .update_status(created.request_id, too_early)
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            DbError::Invalid(ValidationError::Inconsistent {
                field: "resolved_date",
                ..
            })
        ),
        "got {:?}",
        err
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn maintenance_unknown_references() {
    let pool = setup().await;
    let room = new_room(&pool, RoomStatus::Available).await;
    let today = date(2024, 3, 10);
    let repo = MaintenanceRepo::new(&pool);

    let unknown_room = MaintenanceRequestCreate {
        room_id: i64::MAX,
        guest_id: None,
        issue_description: "Door jammed".into(),
        reported_date: None,
        status: MaintenanceStatus::Pending,
        resolved_date: None,
    }
    .validate(today)
    .unwrap();
    let err = repo.create(unknown_room).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "room", .. }));

    let unknown_guest = MaintenanceRequestCreate {
        room_id: room.room_id,
        guest_id: Some(i64::MAX),
        issue_description: "No hot water".into(),
        reported_date: None,
        status: MaintenanceStatus::Pending,
        resolved_date: None,
    }
    .validate(today)
    .unwrap();
    let err = repo.create(unknown_guest).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "guest", .. }));

    let change = MaintenanceUpdate {
        status: Some(MaintenanceStatus::InProgress),
        resolved_date: None,
    }
    .validate(today)
    .unwrap();
    let err = repo.update_status(i64::MAX, change).await.unwrap_err();
    assert!(matches!(
        err,
        DbError::NotFound {
            resource: "maintenance request",
            ..
        }
    ));
}

#[tokio::test]
#[ignore = "requires database"]
async fn maintenance_resolved_default_follows_future_report() {
    let pool = setup().await;
    let room = new_room(&pool, RoomStatus::Available).await;
    let today = date(2024, 3, 10);

    let request = MaintenanceRequestCreate {
        room_id: room.room_id,
        guest_id: None,
        issue_description: "Scheduled repaint".into(),
        reported_date: Some(date(2024, 3, 20)),
        status: MaintenanceStatus::Pending,
        resolved_date: None,
    }
    .validate(today)
    .unwrap();

    let repo = MaintenanceRepo::new(&pool);
    let created = repo.create(request).await.unwrap();

    let resolved = MaintenanceUpdate {
        status: Some(MaintenanceStatus::Resolved),
        resolved_date: None,
    }
    .validate(today)
    .unwrap();
    let updated = repo
        .update_status(created.request_id, resolved)
        .await
        .expect("defaulted resolution must not precede the report");

    assert_eq!(updated.status, MaintenanceStatus::Resolved);
    assert_eq!(updated.resolved_date, Some(date(2024, 3, 20)));
}
