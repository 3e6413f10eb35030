use dotenv::dotenv;
use household_todos::{app_env, db};
use lazy_static::lazy_static;
use rand::{Rng, thread_rng};
use sqlx::{Connection, PgConnection, PgPool};
use std::env;
use std::future::Future;
use std::panic;
use tokio::runtime::Runtime;

pub const HOUSEHOLD: &str = "a12345";

lazy_static! {
    static ref TOKIO_RT: Runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Tokio runtime failed to initialize");
}

/// IDs of the rows every test database starts with
pub struct SeededHousehold {
    pub mom: i32,
    pub dad: i32,
    pub kiddo: i32,
    pub chores: i32,
}

struct TestDatabase {
    base_url: String,
    db_name: String,
}

impl TestDatabase {
    async fn create(base_url: &str) -> Result<Self, sqlx::Error> {
        let mut rng = thread_rng();
        let db_id: u32 = rng.gen_range(10_000..99_999);
        let db_name = format!("test_db_{}", db_id);
        let mut conn = PgConnection::connect(base_url).await?;

        sqlx::query(format!("CREATE DATABASE {}", db_name).as_str())
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        Ok(Self {
            base_url: String::from(base_url),
            db_name,
        })
    }

    fn url(&self) -> String {
        format!("{}/{}", self.base_url, self.db_name)
    }

    async fn remove(self) {
        let conn = PgConnection::connect(self.base_url.as_str()).await;
        let mut conn = match conn {
            Ok(cxn) => cxn,
            Err(conn_err) => {
                println!(
                    "Failed to reconnect to database to drop test database {}, please remove it manually. Error: {}",
                    self.db_name, conn_err
                );
                return;
            }
        };

        let drop_result = sqlx::query(format!("DROP DATABASE {} WITH (FORCE)", self.db_name).as_str())
            .execute(&mut conn)
            .await;
        if let Err(db_err) = drop_result {
            println!(
                "Failed to drop test database {}, please remove it manually. Error: {}",
                self.db_name, db_err
            );
        }
    }
}

async fn seed_household(pool: &PgPool) -> Result<SeededHousehold, sqlx::Error> {
    let (mom,): (i32,) = sqlx::query_as(
        "INSERT INTO members(current_household, username, email, points) VALUES ($1, 'mom', 'mom@test.com', 25) RETURNING id",
    )
    .bind(HOUSEHOLD)
    .fetch_one(pool)
    .await?;
    let (dad,): (i32,) = sqlx::query_as(
        "INSERT INTO members(current_household, username, email, points) VALUES ($1, 'dad', 'dad@test.com', 25) RETURNING id",
    )
    .bind(HOUSEHOLD)
    .fetch_one(pool)
    .await?;
    let (kiddo,): (i32,) = sqlx::query_as(
        "INSERT INTO children(current_household, username, points) VALUES ($1, 'kiddo', 5) RETURNING id",
    )
    .bind(HOUSEHOLD)
    .fetch_one(pool)
    .await?;
    let (chores,): (i32,) =
        sqlx::query_as("INSERT INTO categories(household, name) VALUES ($1, 'Chores') RETURNING id")
            .bind(HOUSEHOLD)
            .fetch_one(pool)
            .await?;

    Ok(SeededHousehold {
        mom,
        dad,
        kiddo,
        chores,
    })
}

/// Creates a throwaway database with the current schema and a seeded household, runs the test
/// against it, then drops the database whether or not the test passed.
///
/// Expects that the TEST_DB_URL environment variable is populated
pub fn prepare_db_and_test<F, R>(test_fn: F)
where
    F: FnOnce(PgPool, SeededHousehold) -> R,
    R: Future<Output = ()> + Send + 'static,
{
    dotenv().ok();
    TOKIO_RT.block_on(async move {
        let pg_connection_base_url = env::var(app_env::TEST_DB_URL).expect(
            "You must provide the TEST_DB_URL environment variable as the base postgres connection string",
        );
        let test_db = match TestDatabase::create(&pg_connection_base_url).await {
            Ok(tdb) => tdb,
            Err(db_err) => panic!("Failed to start test database: {}", db_err),
        };

        let pool = db::connect_sqlx(&test_db.url())
            .await
            .expect("could not connect to the test database");
        db::run_migrations(&pool)
            .await
            .expect("could not migrate the test database");
        let seeded = seed_household(&pool)
            .await
            .expect("could not seed the test database");

        let test_outcome = tokio::spawn(test_fn(pool.clone(), seeded)).await;
        pool.close().await;
        test_db.remove().await;

        if let Err(join_err) = test_outcome {
            if join_err.is_panic() {
                panic::resume_unwind(join_err.into_panic());
            }
            panic!("Test task was cancelled: {join_err}");
        }
    });
}
