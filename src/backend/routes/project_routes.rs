/**
 * Project Routes
 *
 * Everything under `/project`. Access to a project is settled by the
 * `ProjectMember` / `ProjectAdmin` / `ProjectCreator` extractors in each
 * handler; the routes only fix the shape of the URL.
 */

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::gantt::{activities, handlers as gantt};
use crate::backend::project::handlers as project;
use crate::backend::server::state::AppState;
use crate::backend::todo::{handlers as todo, tasks};
use crate::backend::trello::{cards, handlers as trello, lists};

pub fn configure_project_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/project", get(project::list_projects).post(project::create_project))
        .route("/project/recent", get(project::list_recent_projects))
        .route("/project/del", get(project::list_deleted_projects))
        .route(
            "/project/{projectId}",
            put(project::update_project).delete(project::delete_project),
        )
        .route("/project/addPeople/{projectId}", post(project::add_people))
        .route("/project/updatePeople/{projectId}", put(project::update_people))
        .route("/project/leave/{projectId}", put(project::leave_project))
        .route("/project/restore/{projectId}", put(project::restore_project))
        .nest("/project/{projectId}/gantt", gantt_routes())
        .nest("/project/{projectId}/todo", todo_routes())
        .nest("/project/{projectId}/trello", trello_routes())
}

fn gantt_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(gantt::list_gantts).post(gantt::create_gantt))
        .route("/{ganttId}", put(gantt::rename_gantt).delete(gantt::delete_gantt))
        .route(
            "/{ganttId}/activity",
            get(activities::list_activities).post(activities::create_activity),
        )
        .route(
            "/{ganttId}/activity/{activityId}",
            put(activities::update_activity).delete(activities::delete_activity),
        )
}

fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(todo::list_todos).post(todo::create_todo))
        .route("/{toDoId}", put(todo::rename_todo).delete(todo::delete_todo))
        .route("/{toDoId}/task", get(tasks::list_tasks).post(tasks::create_task))
        .route("/{toDoId}/task/realised", get(tasks::list_realised_tasks))
        .route("/{toDoId}/task/order", put(tasks::order_tasks))
        .route(
            "/{toDoId}/task/{taskId}",
            put(tasks::update_task).delete(tasks::delete_task),
        )
        .route("/{toDoId}/task/{taskId}/realised", put(tasks::realise_task))
        .route("/{toDoId}/task/{taskId}/move", put(tasks::move_task))
}

fn trello_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(trello::list_boards).post(trello::create_board))
        .route(
            "/{trelloId}",
            get(trello::get_board)
                .put(trello::rename_board)
                .delete(trello::delete_board),
        )
        .route("/{trelloId}/list", post(lists::create_list))
        .route("/{trelloId}/list/reorder", put(lists::reorder_lists))
        .route(
            "/{trelloId}/list/{listId}",
            put(lists::rename_list).delete(lists::delete_list),
        )
        .route("/{trelloId}/list/{listId}/move", put(lists::move_list))
        .route("/{trelloId}/list/{listId}/card", post(cards::create_card))
        .route("/{trelloId}/list/{listId}/card/reorder/{cardId}", put(cards::move_card))
        .route("/{trelloId}/list/{listId}/card/realised/{cardId}", put(cards::realise_card))
        .route(
            "/{trelloId}/list/{listId}/card/{cardId}",
            put(cards::update_card).delete(cards::delete_card),
        )
}
