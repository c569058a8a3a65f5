//! Transactional execution of move plans
//!
//! Every public function here is one atomic unit: it opens a transaction,
//! reads the item's current slot inside it, applies the planned shifts and
//! commits. An error at any point drops the transaction, which rolls it back.
//!
//! The first statement of each transaction is a write on the row being
//! moved (or on the container), so SQLite takes the write lock up front and
//! concurrent reorders of the same container serialize.

use sqlx::{Sqlite, SqliteExecutor, SqlitePool, Transaction};

use super::collection::OrderedCollection;
use super::error::OrderingError;
use super::plan::{self, MovePlan, Shift, Slot};

/// Move an item to `target_position` inside its current container
pub async fn reorder_within<C: OrderedCollection>(
    pool: &SqlitePool,
    item_id: i64,
    target_position: i64,
) -> Result<MovePlan, OrderingError> {
    relocate::<C>(pool, item_id, None, target_position).await
}

/// Move an item to `target_position` of `target_container_id`, which may be
/// its current container
pub async fn move_item<C: OrderedCollection>(
    pool: &SqlitePool,
    item_id: i64,
    target_container_id: i64,
    target_position: i64,
) -> Result<MovePlan, OrderingError> {
    relocate::<C>(pool, item_id, Some(target_container_id), target_position).await
}

/// Replace the whole ordering of a container with `ordered_ids`
pub async fn apply_full_ordering<C: OrderedCollection>(
    pool: &SqlitePool,
    container_id: i64,
    ordered_ids: &[i64],
) -> Result<(), OrderingError> {
    let mut tx = pool.begin().await?;

    lock_container::<C>(&mut tx, container_id).await?;

    let current_ids: Vec<i64> = sqlx::query_scalar(&format!(
        "SELECT id FROM {} WHERE {} = $1 ORDER BY position",
        C::ITEMS,
        C::PARENT
    ))
    .bind(container_id)
    .fetch_all(&mut *tx)
    .await?;

    let assignments = plan::plan_full_ordering(&current_ids, ordered_ids)?;

    let update = format!("UPDATE {} SET position = $1 WHERE id = $2", C::ITEMS);
    for (id, position) in assignments {
        sqlx::query(&update)
            .bind(position)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    tracing::debug!(
        "Applied full ordering of {} {}s in {} {}",
        ordered_ids.len(),
        C::ITEM_NAME,
        C::CONTAINER_NAME,
        container_id
    );
    Ok(())
}

/// Delete an item and close the gap it leaves
pub async fn remove_item<C: OrderedCollection>(
    pool: &SqlitePool,
    item_id: i64,
) -> Result<(), OrderingError> {
    let mut tx = pool.begin().await?;

    let (container, position): (i64, i64) = sqlx::query_as(&format!(
        "DELETE FROM {} WHERE id = $1 RETURNING {}, position",
        C::ITEMS,
        C::PARENT
    ))
    .bind(item_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(OrderingError::NotFound {
        what: C::ITEM_NAME,
        id: item_id,
    })?;

    let shift = plan::plan_removal(Slot {
        container,
        position,
    });
    apply_shift::<C>(&mut tx, item_id, &shift).await?;

    tx.commit().await?;
    Ok(())
}

/// Position for a new item appended to `container_id`
pub async fn next_position<'e, C, E>(executor: E, container_id: i64) -> Result<i64, sqlx::Error>
where
    C: OrderedCollection,
    E: SqliteExecutor<'e>,
{
    let max: Option<i64> = sqlx::query_scalar(&format!(
        "SELECT MAX(position) FROM {} WHERE {} = $1",
        C::ITEMS,
        C::PARENT
    ))
    .bind(container_id)
    .fetch_one(executor)
    .await?;

    Ok(plan::next_position(max))
}

/// SQL expression computing the append position inline in an `INSERT`
///
/// Binds the container id at parameter `$N`, where `N = param`. Used when the
/// position must be computed by the same statement that inserts the row.
pub fn next_position_expr<C: OrderedCollection>(param: u8) -> String {
    format!(
        "(SELECT COALESCE(MAX(position), 0) + 1 FROM {} WHERE {} = ${})",
        C::ITEMS,
        C::PARENT,
        param
    )
}

async fn relocate<C: OrderedCollection>(
    pool: &SqlitePool,
    item_id: i64,
    target_container: Option<i64>,
    target_position: i64,
) -> Result<MovePlan, OrderingError> {
    let mut tx = pool.begin().await?;

    let (container, position): (i64, i64) = sqlx::query_as(&format!(
        "UPDATE {} SET position = position WHERE id = $1 RETURNING {}, position",
        C::ITEMS,
        C::PARENT
    ))
    .bind(item_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(OrderingError::NotFound {
        what: C::ITEM_NAME,
        id: item_id,
    })?;
    let current = Slot {
        container,
        position,
    };

    let target_container = target_container.unwrap_or(container);
    let source_len = count_items::<C>(&mut tx, container).await?;
    let target_len = if target_container == container {
        source_len
    } else {
        lock_container::<C>(&mut tx, target_container).await?;
        count_items::<C>(&mut tx, target_container).await?
    };

    let target = Slot {
        container: target_container,
        position: target_position,
    };
    let plan = plan::plan_move(current, target, source_len, target_len)?;
    if plan.is_noop() {
        tx.rollback().await?;
        return Ok(plan);
    }

    for shift in &plan.shifts {
        apply_shift::<C>(&mut tx, item_id, shift).await?;
    }

    sqlx::query(&format!(
        "UPDATE {} SET {} = $1, position = $2 WHERE id = $3",
        C::ITEMS,
        C::PARENT
    ))
    .bind(plan.destination.container)
    .bind(plan.destination.position)
    .bind(item_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::debug!(
        "Moved {} {} from {} {}@{} to {} {}@{}",
        C::ITEM_NAME,
        item_id,
        C::CONTAINER_NAME,
        current.container,
        current.position,
        C::CONTAINER_NAME,
        target.container,
        target.position
    );
    Ok(plan)
}

async fn lock_container<C: OrderedCollection>(
    tx: &mut Transaction<'_, Sqlite>,
    container_id: i64,
) -> Result<(), OrderingError> {
    let locked = sqlx::query(&format!(
        "UPDATE {} SET name = name WHERE id = $1",
        C::CONTAINERS
    ))
    .bind(container_id)
    .execute(&mut **tx)
    .await?;

    if locked.rows_affected() == 0 {
        return Err(OrderingError::NotFound {
            what: C::CONTAINER_NAME,
            id: container_id,
        });
    }
    Ok(())
}

async fn count_items<C: OrderedCollection>(
    tx: &mut Transaction<'_, Sqlite>,
    container_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM {} WHERE {} = $1",
        C::ITEMS,
        C::PARENT
    ))
    .bind(container_id)
    .fetch_one(&mut **tx)
    .await
}

async fn apply_shift<C: OrderedCollection>(
    tx: &mut Transaction<'_, Sqlite>,
    moved_id: i64,
    shift: &Shift,
) -> Result<(), sqlx::Error> {
    sqlx::query(&format!(
        r#"
        UPDATE {} SET position = position + $1
        WHERE {} = $2 AND id != $3 AND position >= $4 AND position <= COALESCE($5, position)
        "#,
        C::ITEMS,
        C::PARENT
    ))
    .bind(shift.delta)
    .bind(shift.container)
    .bind(moved_id)
    .bind(shift.low)
    .bind(shift.high)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
