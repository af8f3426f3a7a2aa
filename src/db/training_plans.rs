use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::training_plan::{PlanExercise, PlanExerciseInput, PlanStatus, TrainingPlan, TrainingPlanWithExercises};

/// Plans for a user, newest first, each with its exercises in order.
pub async fn fetch_plans_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<TrainingPlanWithExercises>, sqlx::Error> {
    let plans = sqlx::query_as::<_, TrainingPlan>(
        r#"
        SELECT id, user_id, name, status, created_at
        FROM training_plans
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let plan_ids: Vec<Uuid> = plans.iter().map(|p| p.id).collect();
    let exercises = fetch_exercises(pool, &plan_ids).await?;
    Ok(attach_exercises(plans, exercises))
}

pub async fn fetch_plan(pool: &PgPool, plan_id: Uuid) -> Result<Option<TrainingPlanWithExercises>, sqlx::Error> {
    let Some(plan) = sqlx::query_as::<_, TrainingPlan>(
        "SELECT id, user_id, name, status, created_at FROM training_plans WHERE id = $1",
    )
    .bind(plan_id)
    .fetch_optional(pool)
    .await?
    else {
        return Ok(None);
    };

    let exercises = fetch_exercises(pool, &[plan.id]).await?;
    Ok(attach_exercises(vec![plan], exercises).pop())
}

async fn fetch_exercises(pool: &PgPool, plan_ids: &[Uuid]) -> Result<Vec<PlanExercise>, sqlx::Error> {
    if plan_ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_as::<_, PlanExercise>(
        r#"
        SELECT tpe.plan_id, tpe.device_id, tpe.exercise_order, d.name AS device_name
        FROM training_plan_exercises tpe
        JOIN devices d ON d.id = tpe.device_id
        WHERE tpe.plan_id = ANY($1)
        ORDER BY tpe.plan_id, tpe.exercise_order
        "#,
    )
    .bind(plan_ids)
    .fetch_all(pool)
    .await
}

fn attach_exercises(
    plans: Vec<TrainingPlan>,
    exercises: Vec<PlanExercise>,
) -> Vec<TrainingPlanWithExercises> {
    let mut by_plan: HashMap<Uuid, Vec<PlanExercise>> = HashMap::new();
    for exercise in exercises {
        by_plan.entry(exercise.plan_id).or_default().push(exercise);
    }
    plans
        .into_iter()
        .map(|plan| {
            let exercises = by_plan.remove(&plan.id).unwrap_or_default();
            TrainingPlanWithExercises { plan, exercises }
        })
        .collect()
}

/// Swap the plan's exercise list for `exercises`. Returns `false` when the
/// plan does not exist, in which case nothing is written.
#[tracing::instrument(name = "Replace plan exercises", skip(pool, exercises), fields(count = exercises.len()))]
pub async fn replace_exercises(
    pool: &PgPool,
    plan_id: Uuid,
    exercises: &[PlanExerciseInput],
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM training_plans WHERE id = $1 FOR UPDATE")
        .bind(plan_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Ok(false);
    }

    sqlx::query("DELETE FROM training_plan_exercises WHERE plan_id = $1")
        .bind(plan_id)
        .execute(&mut *tx)
        .await?;

    for exercise in exercises {
        sqlx::query(
            r#"
            INSERT INTO training_plan_exercises (id, plan_id, device_id, exercise_order)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(plan_id)
        .bind(exercise.device_id)
        .bind(exercise.exercise_order)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(true)
}

/// Delete a plan and its exercises. Returns `false` when nothing matched.
pub async fn delete_plan(pool: &PgPool, plan_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM training_plan_exercises WHERE plan_id = $1")
        .bind(plan_id)
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM training_plans WHERE id = $1")
        .bind(plan_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(false);
    }
    tx.commit().await?;
    Ok(true)
}

/// Activate a plan and return its device ids in exercise order.
pub async fn start_plan(pool: &PgPool, plan_id: Uuid) -> Result<Option<Vec<Uuid>>, sqlx::Error> {
    let result = sqlx::query("UPDATE training_plans SET status = $1 WHERE id = $2")
        .bind(PlanStatus::Active.as_str())
        .bind(plan_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let order = sqlx::query_scalar::<_, Uuid>(
        "SELECT device_id FROM training_plan_exercises WHERE plan_id = $1 ORDER BY exercise_order",
    )
    .bind(plan_id)
    .fetch_all(pool)
    .await?;
    Ok(Some(order))
}
