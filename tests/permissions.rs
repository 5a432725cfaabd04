use kanban_authz::models::{Board, Comment, Task, User};
use kanban_authz::permissions::{
    resolve, Action, BoardIndex, Decision, DenyReason, Gate, PolicyEngine, PolicyTable, Resource,
    ResourceKind, Role, RoleSet,
};
use pretty_assertions::assert_eq;

const ALICE: i32 = 1;
const BOB: i32 = 2;
const CAROL: i32 = 3;
const DAVE: i32 = 4;

fn user(id: i32) -> User {
    let name = match id {
        ALICE => "alice",
        BOB => "bob",
        CAROL => "carol",
        DAVE => "dave",
        _ => "someone",
    };
    User::new(id, name)
}

fn board_b1() -> Board {
    Board::new(1, "B1", ALICE).with_members([BOB])
}

fn everyone() -> Vec<User> {
    vec![user(ALICE), user(BOB), user(CAROL), user(DAVE), User::superuser(99, "root")]
}

fn check(gate: &Gate<BoardIndex>, actor: &User, action: Action, resource: Resource<'_>) -> Decision {
    gate.check(Some(actor), action, resource)
        .expect("read/update/delete checks are always well-formed")
}

#[test_log::test]
fn owner_and_member_roles_match_board_relationships() {
    let boards = vec![
        board_b1(),
        Board::new(2, "Solo", CAROL),
        Board::new(3, "Self-listed", DAVE).with_members([DAVE, ALICE]),
    ];

    for board in &boards {
        for u in everyone() {
            let roles = resolve(Some(&u), Resource::Board(board));
            assert_eq!(roles.contains(Role::Owner), u.id == board.owner, "owner role of {} on {}", u.id, board.id);
            assert_eq!(roles.contains(Role::Member), board.members.contains(&u.id), "member role of {} on {}", u.id, board.id);
        }
    }
}

#[test_log::test]
fn task_roles_include_board_roles() {
    let board = board_b1();
    let tasks = vec![
        Task::new(1, "plain", Some(board.clone())),
        Task::new(2, "assigned", Some(board.clone())).assigned_to(ALICE).reviewed_by(CAROL),
        Task::new(3, "assigned to outsider", Some(board.clone())).assigned_to(DAVE),
    ];

    for task in &tasks {
        for u in everyone() {
            let board_roles = resolve(Some(&u), Resource::Board(&board));
            let task_roles = resolve(Some(&u), Resource::Task(task));
            assert!(task_roles.is_superset(board_roles), "{:?} ⊉ {:?}", task_roles, board_roles);
        }
    }
}

#[test_log::test]
fn comment_edits_follow_authorship_only() {
    let gate = Gate::new(BoardIndex::from_boards([board_b1()]), PolicyTable::canonical());
    let task = Task::new(1, "t", Some(board_b1()));
    let comments = vec![
        Comment::new(1, Some(task.clone()), ALICE, "by owner"),
        Comment::new(2, Some(task.clone()), BOB, "by member"),
        Comment::new(3, Some(task.clone()), DAVE, "by outsider"),
    ];

    for comment in &comments {
        for u in [user(ALICE), user(BOB), user(CAROL), user(DAVE)] {
            for action in [Action::Update, Action::Delete] {
                let decision = check(&gate, &u, action, Resource::Comment(comment));
                assert_eq!(decision.is_granted(), u.id == comment.author);
                if u.id != comment.author {
                    assert_eq!(decision, Decision::Deny(DenyReason::NotAuthor));
                }
            }
        }
    }
}

#[test_log::test]
fn authorize_is_idempotent() {
    let engine = PolicyEngine::default();
    let bob = user(BOB);
    let role_sets = [
        RoleSet::empty(),
        RoleSet::of(&[Role::Member]),
        RoleSet::of(&[Role::Owner, Role::Assignee]),
        RoleSet::of(&[Role::Author]),
    ];

    for kind in ResourceKind::ALL {
        for action in Action::ALL {
            for roles in role_sets {
                let first = engine.authorize(Some(&bob), action, kind, roles);
                let second = engine.authorize(Some(&bob), action, kind, roles);
                assert_eq!(first, second);
            }
        }
    }
}

#[test_log::test]
fn scenario_a_board_read() {
    let gate = Gate::new(BoardIndex::from_boards([board_b1()]), PolicyTable::canonical());
    let board = board_b1();

    assert_eq!(check(&gate, &user(ALICE), Action::Read, Resource::Board(&board)), Decision::Grant);
    assert_eq!(check(&gate, &user(BOB), Action::Read, Resource::Board(&board)), Decision::Grant);
    assert_eq!(
        check(&gate, &user(CAROL), Action::Read, Resource::Board(&board)),
        Decision::Deny(DenyReason::NotBoardMember)
    );
}

#[test_log::test]
fn scenario_b_assignee_cannot_edit() {
    let gate = Gate::new(BoardIndex::from_boards([board_b1()]), PolicyTable::canonical());
    let task = Task::new(1, "t", Some(board_b1())).assigned_to(BOB);

    assert_eq!(
        check(&gate, &user(BOB), Action::Update, Resource::Task(&task)),
        Decision::Deny(DenyReason::NotOwner)
    );
    assert_eq!(check(&gate, &user(BOB), Action::Read, Resource::Task(&task)), Decision::Grant);
    assert_eq!(check(&gate, &user(ALICE), Action::Update, Resource::Task(&task)), Decision::Grant);
    assert_eq!(check(&gate, &user(ALICE), Action::Delete, Resource::Task(&task)), Decision::Grant);
}

#[test_log::test]
fn scenario_c_author_outside_board() {
    let gate = Gate::new(BoardIndex::from_boards([board_b1()]), PolicyTable::canonical());
    let task = Task::new(1, "t", Some(board_b1()));
    let comment = Comment::new(1, Some(task.clone()), DAVE, "drive-by");

    assert_eq!(
        gate.check_comment_create(Some(&user(DAVE)), Some(&task)),
        Decision::Deny(DenyReason::NotBoardMember)
    );
    assert_eq!(check(&gate, &user(DAVE), Action::Update, Resource::Comment(&comment)), Decision::Grant);
    assert_eq!(
        check(&gate, &user(DAVE), Action::Read, Resource::Comment(&comment)),
        Decision::Deny(DenyReason::NotBoardMember)
    );
}

#[test_log::test]
fn scenario_d_task_on_deleted_board() {
    let gate = Gate::new(BoardIndex::new(), PolicyTable::canonical());

    assert_eq!(
        gate.check_task_create(Some(&user(ALICE)), Some(1)),
        Ok(Decision::Deny(DenyReason::ResourceMissing))
    );
}

#[test_log::test]
fn scenario_e_superuser_without_relationships() {
    let gate = Gate::new(BoardIndex::from_boards([board_b1()]), PolicyTable::canonical());
    let root = User::superuser(99, "root");
    let board = board_b1();
    let task = Task::new(1, "t", Some(board_b1()));
    let orphan = Task::new(2, "orphan", None);
    let comment = Comment::new(1, Some(task.clone()), DAVE, "c");

    for action in [Action::Read, Action::Update, Action::Delete] {
        assert_eq!(check(&gate, &root, action, Resource::Board(&board)), Decision::Grant);
        assert_eq!(check(&gate, &root, action, Resource::Task(&task)), Decision::Grant);
        assert_eq!(check(&gate, &root, action, Resource::Task(&orphan)), Decision::Grant);
        assert_eq!(check(&gate, &root, action, Resource::Comment(&comment)), Decision::Grant);
    }
    assert_eq!(gate.check_board_create(Some(&root)), Decision::Grant);
    assert_eq!(gate.check_board_list(Some(&root)), Decision::Grant);
    assert_eq!(gate.check_task_create(Some(&root), Some(1)), Ok(Decision::Grant));
    assert_eq!(gate.check_comment_create(Some(&root), Some(&task)), Decision::Grant);
}

#[test_log::test]
fn orphaned_resources_are_superuser_only() {
    let gate = Gate::new(BoardIndex::from_boards([board_b1()]), PolicyTable::canonical());
    let orphan = Task::new(2, "orphan", None).assigned_to(BOB);
    let comment = Comment::new(3, Some(orphan.clone()), BOB, "still mine");

    for u in [user(ALICE), user(BOB)] {
        assert_eq!(
            check(&gate, &u, Action::Read, Resource::Task(&orphan)),
            Decision::Deny(DenyReason::NotBoardMember)
        );
    }
    assert_eq!(
        check(&gate, &user(BOB), Action::Read, Resource::Comment(&comment)),
        Decision::Deny(DenyReason::NotBoardMember)
    );
    assert_eq!(check(&gate, &user(BOB), Action::Delete, Resource::Comment(&comment)), Decision::Grant);
}
