use std::fs;
use std::io::Read;
use std::path::Path;

use git2::{Repository, Signature};
use jdsl::history::{GitHistory, HistoryStore};
use speculate2::speculate;

/// Commit `files` on top of HEAD and return the commit hash.
fn commit(repo: &Repository, files: &[(&str, &str)]) -> String {
    let root = repo.workdir().expect("Repository has no workdir");
    let mut index = repo.index().expect("Failed to open index");
    for (path, content) in files {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).expect("Failed to create parent");
        fs::write(&full, content).expect("Failed to write file");
        index.add_path(Path::new(path)).expect("Failed to stage file");
    }
    index.write().expect("Failed to write index");

    let tree = repo
        .find_tree(index.write_tree().expect("Failed to write tree"))
        .expect("Failed to find tree");
    let sig = Signature::now("Test", "test@example.com").expect("Failed to build signature");
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, "update", &tree, &parents)
        .expect("Failed to commit")
        .to_string()
}

fn read(history: &GitHistory, revision: &str, path: &str) -> Result<String, String> {
    let mut reader = history
        .resolve(revision, Path::new(path))
        .map_err(|e| e.to_string())?;
    let mut out = String::new();
    reader.read_to_string(&mut out).map_err(|e| e.to_string())?;
    Ok(out)
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let repo = Repository::init(dir.path()).expect("Failed to init repository");
        let first = commit(&repo, &[("src/app.js", "one\n")]);
        let second = commit(&repo, &[("src/app.js", "two\n"), ("README", "hi\n")]);
        let history = GitHistory::open(dir.path()).expect("Failed to open history");
    }

    describe "resolve" {
        it "returns the content at each revision" {
            assert_eq!(read(&history, &first, "src/app.js").unwrap(), "one\n");
            assert_eq!(read(&history, &second, "src/app.js").unwrap(), "two\n");
        }

        it "resolves references as well as hashes" {
            assert_eq!(read(&history, "HEAD", "src/app.js").unwrap(), "two\n");
            assert_eq!(read(&history, "HEAD~1", "src/app.js").unwrap(), "one\n");
        }

        it "accepts dot-prefixed paths" {
            assert_eq!(read(&history, &first, "./src/app.js").unwrap(), "one\n");
        }

        it "fails for a path added later" {
            let err = history.resolve(&first, Path::new("README")).err().expect("should fail");
            assert_eq!(err.revision, first);
            assert_eq!(err.path, Path::new("README"));
        }

        it "fails for an unknown revision" {
            let err = history.resolve("deadbeef", Path::new("src/app.js")).err().expect("should fail");
            assert_eq!(err.revision, "deadbeef");
            assert!(err.to_string().contains("src/app.js"));
        }

        it "fails for a directory" {
            assert!(history.resolve(&second, Path::new("src")).is_err());
        }

        it "does not touch the working copy" {
            fs::write(dir.path().join("src/app.js"), "dirty\n").unwrap();

            assert_eq!(read(&history, &first, "src/app.js").unwrap(), "one\n");
            assert_eq!(fs::read_to_string(dir.path().join("src/app.js")).unwrap(), "dirty\n");
        }
    }
}
